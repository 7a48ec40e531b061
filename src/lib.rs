//! Clothing-retail inventory simulation with a deliberate size bias, and
//! the analysis that finds it again.
//!
//! The pipeline runs strictly forward: stock a year, sell from it, send
//! the leftovers back, repeat for each historical year; then compare the
//! current year's stock against the sales history and build a corrected
//! purchase order.

pub mod analysis;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{EngineError, Result};
pub use simulation::config::SimulationConfig;
pub use simulation::engine::InventorySimulation;
