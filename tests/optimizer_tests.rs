use greenwave::api;
use greenwave::config::OptimizerConfig;
use greenwave::demand::DemandVector;
use greenwave::error::GreenwaveError;

fn seeded(seed: u64) -> OptimizerConfig {
    OptimizerConfig {
        seed,
        // Wider than the ceiling, so these tests always run the full
        // generation budget instead of stopping on an early stall.
        convergence_window: 300,
        ..OptimizerConfig::default()
    }
}

fn assert_feasible(plan: &greenwave::api::TimingPlan, config: &OptimizerConfig) {
    assert_eq!(plan.total(), config.cycle_budget);
    for d in plan.durations() {
        assert!(
            d >= config.min_green && d <= config.max_green,
            "duration {} outside [{}, {}]",
            d,
            config.min_green,
            config.max_green
        );
    }
}

#[test]
fn test_same_seed_same_plan() {
    let demand = DemandVector::new(40, 10, 30, 20);
    let config = seeded(12345);

    let a = api::optimize(&demand, &config).unwrap();
    let b = api::optimize(&demand, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_equal_demand_yields_near_equal_split() {
    let demand = DemandVector::new(10, 10, 10, 10);
    let config = seeded(1);

    let plan = api::optimize(&demand, &config).unwrap();
    assert_feasible(&plan, &config);

    let durations = plan.durations();
    let min = *durations.iter().min().unwrap();
    let max = *durations.iter().max().unwrap();
    assert!(max - min <= 2, "unbalanced plan: {:?}", durations);
}

#[test]
fn test_zero_demand_yields_equal_split() {
    let demand = DemandVector::new(0, 0, 0, 0);
    let config = seeded(2);

    let plan = api::optimize(&demand, &config).unwrap();
    assert_feasible(&plan, &config);

    // cycle_budget / 4 == 30; every approach must sit within a second.
    for d in plan.durations() {
        assert!((29..=31).contains(&d), "unexpected split: {:?}", plan);
    }
}

#[test]
fn test_overwhelming_demand_saturates_max_green() {
    let demand = DemandVector::new(1000, 1, 1, 1);
    let config = seeded(3);

    let plan = api::optimize(&demand, &config).unwrap();
    assert_feasible(&plan, &config);

    assert_eq!(plan.north, config.max_green);
    assert_eq!(plan.south, config.min_green);
    assert_eq!(plan.east, config.min_green);
    assert_eq!(plan.west, config.min_green);
}

#[test]
fn test_worked_example_preserves_demand_ordering() {
    let demand = DemandVector::new(40, 10, 30, 20);
    let config = seeded(4);

    let plan = api::optimize(&demand, &config).unwrap();
    assert_feasible(&plan, &config);

    assert!(plan.north > plan.east, "plan: {:?}", plan);
    assert!(plan.east > plan.west, "plan: {:?}", plan);
    assert!(plan.west > plan.south, "plan: {:?}", plan);
}

#[test]
fn test_infeasible_config_rejected_before_any_work() {
    let demand = DemandVector::new(10, 10, 10, 10);
    let config = OptimizerConfig {
        min_green: 40,
        max_green: 50,
        ..OptimizerConfig::default()
    };

    match api::optimize(&demand, &config) {
        Err(GreenwaveError::InfeasibleConfig(_)) => {}
        other => panic!("expected InfeasibleConfig, got {:?}", other.map(|p| p.durations())),
    }
}

#[test]
fn test_generation_ceiling_still_returns_a_plan() {
    let demand = DemandVector::new(99, 3, 42, 17);
    let config = OptimizerConfig {
        max_generations: 1,
        convergence_window: 100,
        ..OptimizerConfig::default()
    };

    // Not converging is a soft degradation, never an error.
    let plan = api::optimize(&demand, &config).unwrap();
    assert_feasible(&plan, &config);
}

#[test]
fn test_outcome_reports_convergence_metadata() {
    let demand = DemandVector::new(10, 10, 10, 10);
    let config = seeded(5);

    let outcome = api::optimize_with_progress(
        &demand,
        &config,
        &greenwave::optimizer::runner::NoProgress,
    )
    .unwrap();

    assert!(outcome.generations <= config.max_generations);
    assert!(outcome.fitness <= 0.0);
    assert_feasible(&outcome.plan, &config);
}
