// ===== greenwave/src/reports.rs =====
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use greenwave::api::OptimizationOutcome;
use greenwave::config::OptimizerConfig;
use greenwave::demand::{DemandVector, Direction};
use greenwave::fitness;
use strum::IntoEnumIterator;

pub fn print_plan_report(
    demand: &DemandVector,
    outcome: &OptimizationOutcome,
    config: &OptimizerConfig,
) {
    let desired = fitness::desired_allocation(demand, config);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Approach").add_attribute(Attribute::Bold),
        Cell::new("Vehicles"),
        Cell::new("Ideal (s)"),
        Cell::new("Green (s)").fg(Color::Green),
    ]);

    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for dir in Direction::iter() {
        table.add_row(vec![
            Cell::new(dir.to_string()).add_attribute(Attribute::Bold),
            Cell::new(demand.get(dir).to_string()),
            Cell::new(format!("{:.0}", desired[dir.index()])),
            Cell::new(outcome.plan.get(dir).to_string()).fg(Color::Green),
        ]);
    }

    println!("{}", table);

    let status = if outcome.converged {
        format!("converged after {} generations", outcome.generations)
    } else {
        format!("stopped at the {}-generation ceiling", outcome.generations)
    };
    println!(
        "Cycle: {}s | Fitness: {:.4} | {}",
        outcome.plan.total(),
        outcome.fitness,
        status
    );
}

pub fn print_batch_report(results: &[(DemandVector, OptimizationOutcome)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("N"),
        Cell::new("S"),
        Cell::new("E"),
        Cell::new("W"),
        Cell::new("Green N").fg(Color::Green),
        Cell::new("Green S").fg(Color::Green),
        Cell::new("Green E").fg(Color::Green),
        Cell::new("Green W").fg(Color::Green),
        Cell::new("Fitness").fg(Color::Cyan),
    ]);

    for i in 1..=9 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (row, (demand, outcome)) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new((row + 1).to_string()).add_attribute(Attribute::Bold),
            Cell::new(demand.north.to_string()),
            Cell::new(demand.south.to_string()),
            Cell::new(demand.east.to_string()),
            Cell::new(demand.west.to_string()),
            Cell::new(outcome.plan.north.to_string()).fg(Color::Green),
            Cell::new(outcome.plan.south.to_string()).fg(Color::Green),
            Cell::new(outcome.plan.east.to_string()).fg(Color::Green),
            Cell::new(outcome.plan.west.to_string()).fg(Color::Green),
            Cell::new(format!("{:.4}", outcome.fitness)).fg(Color::Cyan),
        ]);
    }

    println!("{}", table);
}
