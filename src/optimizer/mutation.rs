// ===== greenwave/src/optimizer/mutation.rs =====
use super::{repair, Candidate};
use crate::config::OptimizerConfig;
use crate::demand::{DemandVector, DIRECTION_COUNT};
use fastrand::Rng;

/// Draws a fresh random candidate. The first three genes are uniform in
/// the green bounds; the last takes whatever keeps the sum on budget, and
/// repair settles the result into the feasible region. Keeps the initial
/// population diverse without a separate feasibility path.
pub fn random_candidate(
    rng: &mut Rng,
    demand: &DemandVector,
    config: &OptimizerConfig,
    seq: u64,
) -> Candidate {
    let min = config.min_green as i64;
    let max = config.max_green as i64;

    let mut raw = [0i64; DIRECTION_COUNT];
    let mut remaining = config.cycle_budget as i64;
    for slot in raw.iter_mut().take(DIRECTION_COUNT - 1) {
        *slot = rng.i64(min..=max);
        remaining -= *slot;
    }
    raw[DIRECTION_COUNT - 1] = remaining;

    repair(raw, demand, config, seq)
}

/// Point mutation: resamples one gene uniformly within the green bounds,
/// then repairs.
pub fn mutate(
    candidate: &Candidate,
    rng: &mut Rng,
    demand: &DemandVector,
    config: &OptimizerConfig,
    seq: u64,
) -> Candidate {
    let gene = rng.usize(0..DIRECTION_COUNT);

    let mut raw = [0i64; DIRECTION_COUNT];
    for i in 0..DIRECTION_COUNT {
        raw[i] = candidate.durations[i] as i64;
    }
    raw[gene] = rng.i64(config.min_green as i64..=config.max_green as i64);

    repair(raw, demand, config, seq)
}
