//! Output formatting for the demo.

use hograph_query::PathTable;

/// Render a table with left-aligned columns and a header rule.
pub fn format_table(table: &PathTable) -> Vec<String> {
    let cells: Vec<Vec<String>> = table
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns().iter().map(String::len).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let render = |row: &[String]| {
        row.iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(table.columns())];
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(cells.iter().map(|row| render(row.as_slice())));
    lines.push(format!("({} rows)", table.len()));
    lines
}

/// Print usage.
pub fn print_help() {
    println!("hograph demo: higher-order graph walkthroughs on an in-memory store");
    println!();
    println!("USAGE:");
    println!("  hograph-demo [OPTIONS] [SCENARIO...]");
    println!();
    println!("OPTIONS:");
    println!("  -v, --verbose      Log storage writes (debug level)");
    println!("  --strict           Require unique matches for get/update/delete");
    println!("  --config <FILE>    Load a JSON storage configuration");
    println!("  -h, --help         Show this help");
    println!();
    println!("SCENARIOS (all when none given):");
    println!("  family      hyperedge CRUD over a family");
    println!("  olap        path queries and feature extraction");
    println!("  incidents   manufacturing incidents as shared-member subgraphs");
    println!("  causality   branching causal chains as tuples");
    println!("  tuples      team/project assignments as tuples");
}
