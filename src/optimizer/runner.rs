use super::convergence::ConvergenceWindow;
use super::engine::Generation;
use crate::config::OptimizerConfig;
use crate::demand::{DemandVector, DIRECTION_COUNT};
use tracing::{debug, info};

/// Phase of one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initializing,
    Evolving,
    Converged,
}

/// A hook for observing generations. Returning false aborts the run
/// cooperatively after the current generation; the best candidate found
/// so far still comes back.
pub trait ProgressCallback: Send + Sync {
    fn on_generation(
        &self,
        generation: usize,
        best_fitness: f64,
        best: &[u32; DIRECTION_COUNT],
    ) -> bool;
}

/// Callback that lets the run proceed untouched.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_generation(&self, _: usize, _: f64, _: &[u32; DIRECTION_COUNT]) -> bool {
        true
    }
}

pub struct OptimizationResult {
    pub durations: [u32; DIRECTION_COUNT],
    pub fitness: f64,
    /// Evolution steps actually taken.
    pub generations: usize,
    /// True when the stall detector stopped the run before the ceiling.
    pub converged: bool,
}

/// Drives one seeded run over its own population; nothing here outlives
/// the call, so concurrent runs never share state.
pub struct Optimizer<'a> {
    demand: &'a DemandVector,
    config: &'a OptimizerConfig,
}

impl<'a> Optimizer<'a> {
    pub fn new(demand: &'a DemandVector, config: &'a OptimizerConfig) -> Self {
        Self { demand, config }
    }

    /// Runs the state machine `Initializing -> Evolving* -> Converged`.
    /// The generation ceiling always applies; failing to detect
    /// convergence before it is not an error, the best plan so far wins.
    pub fn run<CB: ProgressCallback>(&self, callback: &CB) -> OptimizationResult {
        let mut rng = fastrand::Rng::with_seed(self.config.seed);
        let mut seq: u64 = 0;
        let mut detector = ConvergenceWindow::new(
            self.config.convergence_window,
            self.config.convergence_epsilon,
        );

        let mut state = RunState::Initializing;
        debug!(state = ?state, seed = self.config.seed, "seeding population");

        let mut current = Generation::seed(self.demand, self.config, &mut rng, &mut seq);
        state = RunState::Evolving;
        let mut converged = false;

        debug!(
            best = current.best().fitness(),
            population = current.members.len(),
            "population initialized"
        );

        while state == RunState::Evolving {
            if current.index >= self.config.max_generations {
                state = RunState::Converged;
            } else if detector.observe(current.best().fitness()) {
                converged = true;
                state = RunState::Converged;
            } else {
                let next = current.advance(self.demand, self.config, &mut rng, &mut seq);
                let keep_going = callback.on_generation(
                    next.index,
                    next.best().fitness(),
                    &next.best().durations,
                );

                debug!(
                    generation = next.index,
                    best = next.best().fitness(),
                    "generation advanced"
                );

                current = next;
                if !keep_going {
                    info!(generation = current.index, "run aborted by caller");
                    state = RunState::Converged;
                }
            }
        }

        let best = current.best();
        info!(
            generations = current.index,
            fitness = best.fitness(),
            converged,
            "search finished"
        );

        OptimizationResult {
            durations: best.durations,
            fitness: best.fitness(),
            generations: current.index,
            converged,
        }
    }
}
