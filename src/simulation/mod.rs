pub mod config;
pub mod engine;
pub mod generator;
pub mod random;
pub mod returns;
pub mod sales;
