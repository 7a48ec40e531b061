// src/simulation/engine.rs

use crate::analysis::dashboard::{dashboard, DashboardData};
use crate::analysis::inventory::{analyze_inventory, InventoryAnalysis};
use crate::analysis::report::{build_report, OptimizationReport, ReportContext};
use crate::analysis::sales::{analyze_sales, SalesAnalysis};
use crate::error::{EngineError, Result};
use crate::model::catalog::Catalog;
use crate::model::order::{PurchaseOrder, Season};
use crate::model::stock::{InventoryItem, ReturnRecord, SaleRecord};
use crate::simulation::config::SimulationConfig;
use crate::simulation::generator::generate_year;
use crate::simulation::random::{RandomSource, RngSource};
use crate::simulation::returns::process_returns;
use crate::simulation::sales::simulate_sales;
use crate::strategy::implementations::BiasedSelection;
use crate::strategy::optimization::optimized_purchase_order;
use crate::strategy::traits::SelectionPolicy;
use tracing::info;

/// One simulation run: the catalog it reads and every collection it
/// builds. Nothing here is shared across runs.
pub struct InventorySimulation {
    config: SimulationConfig,
    catalog: Catalog,
    rng: Box<dyn RandomSource + Send>,

    // The customers' "brain"
    policy: Box<dyn SelectionPolicy>,

    // Accumulated state
    pub inventory: Vec<InventoryItem>,
    pub sales_history: Vec<SaleRecord>,
    pub returns: Vec<ReturnRecord>,
    pub purchase_orders: Vec<PurchaseOrder>,
}

impl InventorySimulation {
    /// Engine with the biased selection policy and a random source seeded
    /// from `config.seed` (entropy when unset).
    pub fn new(config: SimulationConfig, catalog: Catalog) -> Result<Self> {
        let policy = Box::new(BiasedSelection::new(config.biased_gender, config.sales_mix));
        Self::with_policy(config, catalog, policy)
    }

    /// Engine with a caller-chosen selection policy; the random source is
    /// seeded from `config.seed` as in `new`.
    pub fn with_policy(
        config: SimulationConfig,
        catalog: Catalog,
        policy: Box<dyn SelectionPolicy>,
    ) -> Result<Self> {
        let rng: Box<dyn RandomSource + Send> = match config.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };
        Self::with_parts(config, catalog, rng, policy)
    }

    pub fn with_parts(
        config: SimulationConfig,
        catalog: Catalog,
        rng: Box<dyn RandomSource + Send>,
        policy: Box<dyn SelectionPolicy>,
    ) -> Result<Self> {
        config.validate()?;
        if catalog.manufacturers.is_empty()
            || catalog.categories.is_empty()
            || catalog.genders.is_empty()
            || catalog.colors.is_empty()
        {
            return Err(EngineError::InvalidConfig(
                "catalog must list manufacturers, categories, genders and colors".to_string(),
            ));
        }

        Ok(Self {
            config,
            catalog,
            rng,
            policy,
            inventory: Vec::new(),
            sales_history: Vec::new(),
            returns: Vec::new(),
            purchase_orders: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replays the historical years (stock, sell, return) and then stocks
    /// the current year.
    pub fn run(&mut self) -> Result<()> {
        for year in self.config.historical_years() {
            self.generate_year(year)?;
            self.simulate_sales(year)?;
            self.process_returns(year)?;
        }
        self.generate_year(self.config.current_year)?;
        Ok(())
    }

    pub fn generate_year(&mut self, year: i32) -> Result<usize> {
        let items = generate_year(&self.catalog, &self.config, year, &mut *self.rng)?;
        let units: u32 = items.iter().map(|i| i.initial_quantity()).sum();
        info!(year, items = items.len(), units, "inventory stocked");

        let count = items.len();
        self.inventory.extend(items);
        Ok(count)
    }

    pub fn simulate_sales(&mut self, year: i32) -> Result<usize> {
        let sales = simulate_sales(
            &mut self.inventory,
            year,
            &self.config,
            self.policy.as_ref(),
            &mut *self.rng,
        )?;
        let units: u32 = sales.iter().map(|s| s.quantity).sum();
        info!(year, transactions = sales.len(), units, "sales simulated");

        let count = sales.len();
        self.sales_history.extend(sales);
        Ok(count)
    }

    pub fn process_returns(&mut self, year: i32) -> Result<usize> {
        let returns = process_returns(
            &mut self.inventory,
            year,
            &self.catalog,
            self.config.return_threshold,
        )?;
        let value: f64 = returns.iter().map(|r| r.return_value).sum();
        info!(
            year,
            returned = returns.len(),
            value,
            "year-end returns processed"
        );

        let count = returns.len();
        self.returns.extend(returns);
        Ok(count)
    }

    pub fn analyze_current_inventory(&self) -> InventoryAnalysis {
        analyze_inventory(
            &self.inventory,
            self.config.current_year,
            &self.catalog.genders,
        )
    }

    pub fn analyze_sales(&self) -> SalesAnalysis {
        analyze_sales(&self.sales_history, &self.inventory, &self.catalog.genders)
    }

    pub fn optimization_report(&self) -> OptimizationReport {
        let ctx = ReportContext {
            catalog: &self.catalog,
            items: &self.inventory,
            year: self.config.current_year,
            biased_gender: self.config.biased_gender,
            return_threshold: self.config.return_threshold,
        };
        let report = build_report(&ctx, &self.analyze_current_inventory(), &self.analyze_sales());
        info!(
            year = report.year,
            summary_lines = report.overall_summary.len(),
            "optimization report built"
        );
        report
    }

    pub fn dashboard(&self) -> DashboardData {
        dashboard(
            &self.analyze_current_inventory(),
            &self.analyze_sales(),
            &self.catalog.genders,
            self.config.biased_gender,
        )
    }

    /// Builds a sales-driven order for one manufacturer and logs it.
    pub fn generate_optimized_purchase_order(
        &mut self,
        manufacturer_id: u32,
        season: Season,
        year: i32,
    ) -> Result<&PurchaseOrder> {
        let sales = self.analyze_sales();
        let order = optimized_purchase_order(
            &self.catalog,
            manufacturer_id,
            season,
            year,
            &sales,
            &mut *self.rng,
        )?;
        info!(
            order_id = %order.order_id,
            lines = order.lines.len(),
            quantity = order.total_quantity,
            cost = order.total_cost,
            "purchase order created"
        );

        self.purchase_orders.push(order);
        let last = self.purchase_orders.len() - 1;
        Ok(&self.purchase_orders[last])
    }

    /// Total value recovered from manufacturers across all returns.
    pub fn total_return_value(&self) -> f64 {
        self.returns.iter().map(|r| r.return_value).sum()
    }

    /// Revenue per year, oldest first.
    pub fn revenue_by_year(&self) -> Vec<(i32, f64)> {
        let mut breakdown: Vec<(i32, f64)> = Vec::new();
        for sale in &self.sales_history {
            let year = sale.product_id.year;
            match breakdown.iter_mut().find(|(y, _)| *y == year) {
                Some((_, revenue)) => *revenue += sale.total_price,
                None => breakdown.push((year, sale.total_price)),
            }
        }
        breakdown.sort_by_key(|(year, _)| *year);
        breakdown
    }
}

impl std::fmt::Debug for InventorySimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventorySimulation")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .field("inventory", &self.inventory.len())
            .field("sales_history", &self.sales_history.len())
            .field("returns", &self.returns.len())
            .field("purchase_orders", &self.purchase_orders.len())
            .finish()
    }
}
