use crate::demand::DIRECTION_COUNT;
use fastrand::Rng;

/// Uniform crossover: each gene comes from either parent with equal
/// probability. The result usually breaks the budget sum and must go
/// through repair before it joins a population.
pub fn crossover_uniform(
    p1: &[u32; DIRECTION_COUNT],
    p2: &[u32; DIRECTION_COUNT],
    rng: &mut Rng,
) -> [i64; DIRECTION_COUNT] {
    let mut child = [0i64; DIRECTION_COUNT];
    for i in 0..DIRECTION_COUNT {
        child[i] = i64::from(if rng.bool() { p1[i] } else { p2[i] });
    }
    child
}
