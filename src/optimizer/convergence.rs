use std::collections::VecDeque;

/// Sliding-window stall detector over the best fitness per generation.
/// The run counts as converged once the window is full and the gain
/// across it drops below epsilon.
#[derive(Debug)]
pub struct ConvergenceWindow {
    window: usize,
    epsilon: f64,
    history: VecDeque<f64>,
}

impl ConvergenceWindow {
    pub fn new(window: usize, epsilon: f64) -> Self {
        Self {
            window,
            epsilon,
            history: VecDeque::with_capacity(window + 1),
        }
    }

    /// Records one generation's best fitness. Returns true when the
    /// improvement over the last `window` generations falls below
    /// epsilon.
    pub fn observe(&mut self, best_fitness: f64) -> bool {
        self.history.push_back(best_fitness);
        if self.history.len() <= self.window {
            return false;
        }
        match self.history.pop_front() {
            Some(oldest) => best_fitness - oldest < self.epsilon,
            None => false,
        }
    }
}
