pub mod convergence;
pub mod crossover;
pub mod engine;
pub mod mutation;
pub mod runner;

use crate::config::OptimizerConfig;
use crate::demand::{DemandVector, DIRECTION_COUNT};
use crate::fitness::Score;

/// One proposed green-time allocation under evaluation.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub durations: [u32; DIRECTION_COUNT],
    /// Cached score; `None` until the candidate has been evaluated.
    /// Operators always produce fresh candidates with a cleared cache.
    pub score: Option<Score>,
    /// Creation order within the run, the final tie-break for ranking.
    pub seq: u64,
}

impl Candidate {
    pub fn fitness(&self) -> f64 {
        self.score.map(|s| s.fitness).unwrap_or(f64::NEG_INFINITY)
    }

    pub fn deviation(&self) -> f64 {
        self.score.map(|s| s.deviation).unwrap_or(f64::INFINITY)
    }

    pub fn total(&self) -> u32 {
        self.durations.iter().sum()
    }
}

/// Restores feasibility after an operator has perturbed a duration vector.
/// Total: any integer input comes back clamped into `[min_green, max_green]`
/// with components summing exactly to the cycle budget.
///
/// Surplus seconds go one at a time to the busiest approach still below
/// `max_green`; deficit seconds come one at a time out of the quietest
/// approach still above `min_green`. Ties fall back to Direction order.
/// The config invariant `4*min_green <= cycle_budget <= 4*max_green`
/// guarantees both loops terminate with delta at zero.
pub fn repair(
    raw: [i64; DIRECTION_COUNT],
    demand: &DemandVector,
    config: &OptimizerConfig,
    seq: u64,
) -> Candidate {
    let min = config.min_green as i64;
    let max = config.max_green as i64;
    let counts = demand.counts();

    let mut durations = [0i64; DIRECTION_COUNT];
    for i in 0..DIRECTION_COUNT {
        durations[i] = raw[i].clamp(min, max);
    }

    let mut delta = config.cycle_budget as i64 - durations.iter().sum::<i64>();

    while delta > 0 {
        let mut target = None;
        for i in 0..DIRECTION_COUNT {
            if durations[i] >= max {
                continue;
            }
            match target {
                None => target = Some(i),
                Some(t) if counts[i] > counts[t] => target = Some(i),
                _ => {}
            }
        }
        match target {
            Some(i) => {
                durations[i] += 1;
                delta -= 1;
            }
            None => break,
        }
    }

    while delta < 0 {
        let mut target = None;
        for i in 0..DIRECTION_COUNT {
            if durations[i] <= min {
                continue;
            }
            match target {
                None => target = Some(i),
                Some(t) if counts[i] < counts[t] => target = Some(i),
                _ => {}
            }
        }
        match target {
            Some(i) => {
                durations[i] -= 1;
                delta += 1;
            }
            None => break,
        }
    }

    let mut out = [0u32; DIRECTION_COUNT];
    for i in 0..DIRECTION_COUNT {
        out[i] = durations[i] as u32;
    }

    Candidate {
        durations: out,
        score: None,
        seq,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_feasible(c: &Candidate, config: &OptimizerConfig) -> bool {
        c.total() == config.cycle_budget
            && c.durations
                .iter()
                .all(|&d| d >= config.min_green && d <= config.max_green)
    }

    #[test]
    fn test_repair_noop_on_feasible() {
        let config = OptimizerConfig::default();
        let demand = DemandVector::new(40, 10, 30, 20);
        let c = repair([48, 12, 36, 24], &demand, &config, 0);
        assert_eq!(c.durations, [48, 12, 36, 24]);
    }

    #[test]
    fn test_repair_surplus_feeds_busiest() {
        let config = OptimizerConfig::default();
        let demand = DemandVector::new(40, 10, 30, 20);
        // Sum 110: the 10 missing seconds belong to the north approach.
        let c = repair([40, 20, 30, 20], &demand, &config, 0);
        assert_eq!(c.durations, [50, 20, 30, 20]);
        assert!(is_feasible(&c, &config));
    }

    #[test]
    fn test_repair_deficit_drains_quietest() {
        let config = OptimizerConfig::default();
        let demand = DemandVector::new(40, 10, 30, 20);
        // Sum 130: the 10 extra seconds come out of the south approach.
        let c = repair([40, 30, 30, 30], &demand, &config, 0);
        assert_eq!(c.durations, [40, 20, 30, 30]);
        assert!(is_feasible(&c, &config));
    }

    #[test]
    fn test_repair_surplus_overflows_to_next_busiest() {
        let config = OptimizerConfig {
            cycle_budget: 300,
            ..OptimizerConfig::default()
        };
        let demand = DemandVector::new(1000, 1, 1, 1);
        // North saturates at max_green; the rest spills over to the tied
        // approaches in Direction order.
        let c = repair([10, 10, 10, 10], &demand, &config, 0);
        assert_eq!(c.durations, [90, 90, 90, 30]);
        assert!(is_feasible(&c, &config));
    }

    #[test]
    fn test_repair_clamps_wild_input() {
        let config = OptimizerConfig::default();
        let demand = DemandVector::new(5, 5, 5, 5);
        let c = repair([-400, 10_000, 3, 7], &demand, &config, 0);
        assert!(is_feasible(&c, &config));
    }

    #[test]
    fn test_repair_tie_breaks_by_direction_order() {
        let config = OptimizerConfig::default();
        let demand = DemandVector::new(0, 0, 0, 0);
        // All demands tie, so every surplus second lands on north first.
        let c = repair([10, 10, 10, 10], &demand, &config, 0);
        assert_eq!(c.durations, [90, 10, 10, 10]);
    }
}
