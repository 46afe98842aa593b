use crate::error::{GreenwaveError, GwResult};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;

/// Search parameters for one optimization run. The defaults match the
/// standard 120-second cycle the reporting layer expects.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Total seconds of green time to allocate in one signal cycle.
    #[arg(long, default_value_t = 120)]
    pub cycle_budget: u32,

    /// Shortest green phase any approach may receive.
    #[arg(long, default_value_t = 10)]
    pub min_green: u32,

    /// Longest green phase any approach may receive.
    #[arg(long, default_value_t = 90)]
    pub max_green: u32,

    #[arg(long, default_value_t = 40)]
    pub population_size: usize,

    #[arg(long, default_value_t = 200)]
    pub max_generations: usize,

    /// Per-child probability of a point mutation.
    #[arg(long, default_value_t = 0.1)]
    pub mutation_rate: f64,

    /// Top candidates carried into the next generation unchanged.
    #[arg(long, default_value_t = 2)]
    pub elite_count: usize,

    /// Generations the best fitness must stall over before stopping early.
    #[arg(long, default_value_t = 20)]
    pub convergence_window: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub convergence_epsilon: f64,

    /// RNG seed. Identical seeds reproduce identical plans.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            cycle_budget: 120,
            min_green: 10,
            max_green: 90,
            population_size: 40,
            max_generations: 200,
            mutation_rate: 0.1,
            elite_count: 2,
            convergence_window: 20,
            convergence_epsilon: 1e-3,
            seed: 0,
        }
    }
}

impl OptimizerConfig {
    /// Checks every configuration invariant up front. A run never starts
    /// on a config that fails here.
    pub fn validate(&self) -> GwResult<()> {
        if self.cycle_budget == 0 {
            return Err(reject("cycle_budget must be positive".to_string()));
        }
        if self.min_green < 1 {
            return Err(reject("min_green must be at least 1".to_string()));
        }
        if self.max_green < self.min_green {
            return Err(reject(format!(
                "max_green ({}) is below min_green ({})",
                self.max_green, self.min_green
            )));
        }
        let floor = 4 * self.min_green as u64;
        let ceil = 4 * self.max_green as u64;
        if (self.cycle_budget as u64) < floor || (self.cycle_budget as u64) > ceil {
            return Err(reject(format!(
                "cycle_budget ({}) must lie within [4*min_green, 4*max_green] = [{}, {}]",
                self.cycle_budget, floor, ceil
            )));
        }
        if self.population_size < 4 {
            return Err(reject("population_size must be at least 4".to_string()));
        }
        if self.population_size % 2 != 0 {
            return Err(reject("population_size must be even".to_string()));
        }
        if self.max_generations < 1 {
            return Err(reject("max_generations must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(reject("mutation_rate must lie within [0, 1]".to_string()));
        }
        if self.elite_count >= self.population_size {
            return Err(reject(format!(
                "elite_count ({}) must be below population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        if self.convergence_window < 1 {
            return Err(reject("convergence_window must be at least 1".to_string()));
        }
        if self.convergence_epsilon < 0.0 {
            return Err(reject("convergence_epsilon must be non-negative".to_string()));
        }
        Ok(())
    }

    pub fn load_from_file(path: &str) -> GwResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: OptimizerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

fn reject(msg: String) -> GreenwaveError {
    GreenwaveError::InfeasibleConfig(msg)
}
