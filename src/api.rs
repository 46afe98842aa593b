// ===== greenwave/src/api.rs =====
use crate::config::OptimizerConfig;
use crate::demand::{DemandVector, Direction, DIRECTION_COUNT};
use crate::error::GwResult;
use crate::optimizer::runner::{NoProgress, Optimizer, ProgressCallback};
use serde::{Deserialize, Serialize};

/// The finished timing plan: green seconds per approach for one cycle.
/// Serializes to the upload service's historical response shape.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingPlan {
    pub north: u32,
    pub south: u32,
    pub east: u32,
    pub west: u32,
}

impl TimingPlan {
    pub fn get(&self, dir: Direction) -> u32 {
        match dir {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn durations(&self) -> [u32; DIRECTION_COUNT] {
        [self.north, self.south, self.east, self.west]
    }

    pub fn total(&self) -> u32 {
        self.durations().iter().sum()
    }

    fn from_durations(d: [u32; DIRECTION_COUNT]) -> Self {
        Self {
            north: d[0],
            south: d[1],
            east: d[2],
            west: d[3],
        }
    }
}

/// Everything a run produced, for callers that want more than the plan.
pub struct OptimizationOutcome {
    pub plan: TimingPlan,
    pub fitness: f64,
    pub generations: usize,
    pub converged: bool,
}

/// Service: run one optimization. Validates the configuration, then
/// searches for the best feasible allocation for `demand`. Either a
/// complete invariant-satisfying plan comes back or an error; there is
/// no partial result.
pub fn optimize(demand: &DemandVector, config: &OptimizerConfig) -> GwResult<TimingPlan> {
    Ok(optimize_with_progress(demand, config, &NoProgress)?.plan)
}

/// Same as [`optimize`], but reports each generation to `callback`.
/// Returning false from the callback stops the run after the current
/// generation and yields the best plan found so far.
pub fn optimize_with_progress<CB: ProgressCallback>(
    demand: &DemandVector,
    config: &OptimizerConfig,
    callback: &CB,
) -> GwResult<OptimizationOutcome> {
    config.validate()?;

    let result = Optimizer::new(demand, config).run(callback);

    Ok(OptimizationOutcome {
        plan: TimingPlan::from_durations(result.durations),
        fitness: result.fitness,
        generations: result.generations,
        converged: result.converged,
    })
}
