use super::crossover::crossover_uniform;
use super::{mutation, repair, Candidate};
use crate::config::OptimizerConfig;
use crate::demand::DemandVector;
use crate::fitness::{desired_allocation, evaluate};
use fastrand::Rng;
use rayon::prelude::*;
use std::cmp::Ordering;

/// One generation of the search: an immutable, rank-sorted snapshot of
/// the population. Advancing builds a fresh snapshot and leaves the
/// previous one untouched.
pub struct Generation {
    pub index: usize,
    pub members: Vec<Candidate>,
}

impl Generation {
    /// Builds and scores the initial population.
    pub fn seed(
        demand: &DemandVector,
        config: &OptimizerConfig,
        rng: &mut Rng,
        seq: &mut u64,
    ) -> Generation {
        let mut members: Vec<Candidate> = (0..config.population_size)
            .map(|_| {
                let c = mutation::random_candidate(rng, demand, config, *seq);
                *seq += 1;
                c
            })
            .collect();

        evaluate_members(&mut members, demand, config);
        members.sort_by(rank);

        Generation { index: 0, members }
    }

    /// One evolution step: elites survive verbatim, the remainder is bred
    /// by binary tournament selection, uniform crossover, repair, and
    /// point mutation at `mutation_rate`.
    pub fn advance(
        &self,
        demand: &DemandVector,
        config: &OptimizerConfig,
        rng: &mut Rng,
        seq: &mut u64,
    ) -> Generation {
        let mut next: Vec<Candidate> = Vec::with_capacity(config.population_size);

        for elite in self.members.iter().take(config.elite_count) {
            next.push(elite.clone());
        }

        while next.len() < config.population_size {
            let p1 = self.tournament(rng);
            let p2 = self.tournament(rng);

            let raw = crossover_uniform(&p1.durations, &p2.durations, rng);
            let mut child = repair(raw, demand, config, *seq);
            *seq += 1;

            if rng.f64() < config.mutation_rate {
                child = mutation::mutate(&child, rng, demand, config, *seq);
                *seq += 1;
            }

            next.push(child);
        }

        evaluate_members(&mut next, demand, config);
        next.sort_by(rank);

        Generation {
            index: self.index + 1,
            members: next,
        }
    }

    /// Binary tournament: two uniform picks, the fitter one wins. The
    /// population is rank-sorted, so the smaller index is the fitter.
    fn tournament(&self, rng: &mut Rng) -> &Candidate {
        let a = rng.usize(0..self.members.len());
        let b = rng.usize(0..self.members.len());
        &self.members[a.min(b)]
    }

    pub fn best(&self) -> &Candidate {
        &self.members[0]
    }
}

/// Scores every member that still lacks a cached score. Evaluation is
/// pure and per-candidate, so it fans out across the rayon pool; the sort
/// that follows is the generation barrier.
fn evaluate_members(members: &mut [Candidate], demand: &DemandVector, config: &OptimizerConfig) {
    let desired = desired_allocation(demand, config);
    members
        .par_iter_mut()
        .filter(|c| c.score.is_none())
        .for_each(|c| {
            c.score = Some(evaluate(&c.durations, &desired));
        });
}

/// Total ranking order: fitness descending, then total deviation
/// ascending, then creation order.
pub fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    b.fitness()
        .total_cmp(&a.fitness())
        .then_with(|| a.deviation().total_cmp(&b.deviation()))
        .then_with(|| a.seq.cmp(&b.seq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::Score;

    fn scored(fitness: f64, deviation: f64, seq: u64) -> Candidate {
        Candidate {
            durations: [30, 30, 30, 30],
            score: Some(Score { fitness, deviation }),
            seq,
        }
    }

    #[test]
    fn test_rank_prefers_higher_fitness() {
        let a = scored(-0.5, 10.0, 0);
        let b = scored(-0.1, 20.0, 1);
        assert_eq!(rank(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_rank_ties_on_deviation_then_seq() {
        let a = scored(-0.5, 10.0, 3);
        let b = scored(-0.5, 12.0, 1);
        assert_eq!(rank(&a, &b), Ordering::Less);

        let c = scored(-0.5, 10.0, 1);
        assert_eq!(rank(&c, &a), Ordering::Less);
    }

    #[test]
    fn test_seed_population_sorted_and_sized() {
        let config = OptimizerConfig::default();
        let demand = DemandVector::new(40, 10, 30, 20);
        let mut rng = fastrand::Rng::with_seed(9);
        let mut seq = 0;

        let snapshot = Generation::seed(&demand, &config, &mut rng, &mut seq);
        assert_eq!(snapshot.members.len(), config.population_size);
        assert_eq!(seq, config.population_size as u64);

        for pair in snapshot.members.windows(2) {
            assert_ne!(rank(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn test_advance_never_regresses_with_elitism() {
        let config = OptimizerConfig::default();
        let demand = DemandVector::new(12, 34, 7, 19);
        let mut rng = fastrand::Rng::with_seed(11);
        let mut seq = 0;

        let mut snapshot = Generation::seed(&demand, &config, &mut rng, &mut seq);
        let mut best = snapshot.best().fitness();

        for _ in 0..30 {
            snapshot = snapshot.advance(&demand, &config, &mut rng, &mut seq);
            let now = snapshot.best().fitness();
            assert!(now >= best, "best fitness regressed: {} -> {}", best, now);
            best = now;
        }
    }

    #[test]
    fn test_advance_members_all_feasible() {
        let config = OptimizerConfig {
            population_size: 12,
            elite_count: 3,
            ..OptimizerConfig::default()
        };
        let demand = DemandVector::new(100, 0, 50, 25);
        let mut rng = fastrand::Rng::with_seed(13);
        let mut seq = 0;

        let mut snapshot = Generation::seed(&demand, &config, &mut rng, &mut seq);
        for _ in 0..20 {
            snapshot = snapshot.advance(&demand, &config, &mut rng, &mut seq);
            for c in &snapshot.members {
                assert_eq!(c.total(), config.cycle_budget);
                for &d in &c.durations {
                    assert!(d >= config.min_green && d <= config.max_green);
                }
            }
        }
    }
}
