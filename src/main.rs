use apparel_size_gap::io::reporting;
use apparel_size_gap::model::catalog::Catalog;
use apparel_size_gap::model::order::Season;
use apparel_size_gap::strategy::implementations::{BiasedSelection, UniformSelection};
use apparel_size_gap::strategy::traits::SelectionPolicy;
use apparel_size_gap::{InventorySimulation, Result, SimulationConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::error;

/// Simulates three years of size-biased apparel sales and reports the
/// resulting inventory gap.
#[derive(Parser, Debug)]
#[command(name = "apparel-size-gap", version)]
struct Args {
    /// Seed for a reproducible run (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Manufacturer to build the optimized purchase order for
    #[arg(long, default_value_t = 1)]
    manufacturer: u32,

    /// Season of the purchase order (spring, summer, fall, winter)
    #[arg(long, default_value = "fall")]
    season: Season,

    /// Directory for the CSV exports; nothing is written when omitted
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Customers pick items uniformly instead of with the size bias
    #[arg(long)]
    uniform: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!(error = %e, "simulation failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    println!("=== Apparel Size Gap Simulation ===");

    // 1. SETUP CONFIGURATION
    let config = SimulationConfig {
        seed: args.seed,
        ..SimulationConfig::default()
    };
    let focus = config.biased_gender;
    let current_year = config.current_year;

    // 2. PICK THE CUSTOMERS' BEHAVIOUR
    let policy: Box<dyn SelectionPolicy> = if args.uniform {
        Box::new(UniformSelection::new())
    } else {
        Box::new(BiasedSelection::new(config.biased_gender, config.sales_mix))
    };

    // 3. RUN THE HISTORICAL YEARS AND STOCK THE CURRENT ONE
    let mut sim = InventorySimulation::with_policy(config, Catalog::standard(), policy)?;
    sim.run()?;

    // 4. ANALYZE
    let report = sim.optimization_report();
    println!("\n{}", reporting::render_report(&report, focus));

    let order = sim
        .generate_optimized_purchase_order(args.manufacturer, args.season, current_year)?
        .clone();
    println!("{}", reporting::render_order(&order, focus));

    println!("=== Revenue by Year ===");
    for (year, revenue) in sim.revenue_by_year() {
        println!("{}: ${:.2}", year, revenue);
    }
    println!("Total Return Value: ${:.2}", sim.total_return_value());

    // 5. EXPORT RESULTS
    if let Some(dir) = args.out_dir {
        std::fs::create_dir_all(&dir)?;
        reporting::write_records(dir.join("sales.csv"), &sim.sales_history)?;
        reporting::write_records(dir.join("returns.csv"), &sim.returns)?;
        reporting::write_records(dir.join("order_lines.csv"), &order.lines)?;
        println!("\nCSV files written to {}", dir.display());
    }

    println!("\nSimulation Complete.");
    Ok(())
}
