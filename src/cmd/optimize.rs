use crate::reports;
use clap::Args;
use greenwave::api;
use greenwave::config::OptimizerConfig;
use greenwave::demand::DemandVector;
use greenwave::error::GwResult;
use greenwave::optimizer::runner::NoProgress;

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: OptimizerConfig,

    /// Vehicles counted on the north approach.
    #[arg(long)]
    pub north: i64,

    /// Vehicles counted on the south approach.
    #[arg(long)]
    pub south: i64,

    /// Vehicles counted on the east approach.
    #[arg(long)]
    pub east: i64,

    /// Vehicles counted on the west approach.
    #[arg(long)]
    pub west: i64,

    /// Emit the plan as JSON instead of a report table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: OptimizeArgs) -> GwResult<()> {
    let demand = DemandVector::from_slice(&[args.north, args.south, args.east, args.west])?;

    let outcome = api::optimize_with_progress(&demand, &args.config, &NoProgress)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.plan)?);
    } else {
        reports::print_plan_report(&demand, &outcome, &args.config);
    }

    Ok(())
}
