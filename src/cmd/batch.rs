use crate::reports;
use clap::Args;
use greenwave::api::{self, OptimizationOutcome, TimingPlan};
use greenwave::config::OptimizerConfig;
use greenwave::demand::{self, DemandVector};
use greenwave::error::GwResult;
use greenwave::optimizer::runner::NoProgress;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub config: OptimizerConfig,

    /// CSV file with one demand row per line: north,south,east,west.
    #[arg(short, long)]
    pub input: String,

    /// Emit the plans as a JSON array instead of a report table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: BatchArgs) -> GwResult<()> {
    let demands = demand::load_demand_file(&args.input)?;
    println!("📂 Loaded {} demand rows from {}", demands.len(), args.input);

    let mut results: Vec<(DemandVector, OptimizationOutcome)> =
        Vec::with_capacity(demands.len());
    for demand in &demands {
        let outcome = api::optimize_with_progress(demand, &args.config, &NoProgress)?;
        results.push((*demand, outcome));
    }

    if args.json {
        let plans: Vec<&TimingPlan> = results.iter().map(|(_, o)| &o.plan).collect();
        println!("{}", serde_json::to_string_pretty(&plans)?);
    } else {
        reports::print_batch_report(&results);
    }

    Ok(())
}
