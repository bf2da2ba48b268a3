use crate::report::table::{Cell, ReportTables, Table};
use std::fmt::Write;

/// Render `table` as left-aligned, space-padded text with a header rule.
pub fn render_table(table: &Table) -> String {
    let widths = table.column_widths();
    let mut out = String::new();

    let header: Vec<String> = table
        .headers
        .iter()
        .zip(widths.iter().copied())
        .map(|(header, width)| format!("{header:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| match cell {
                Cell::Number(_) => format!("{:>width$}", cell.to_string()),
                _ => format!("{:<width$}", cell.to_string()),
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    out
}

pub fn print_report(tables: &ReportTables) {
    println!("\n - ANALYZED DATA - \n");
    print!("{}", render_table(&tables.analyzed));

    if tables.summary.is_empty() {
        println!("\n - NO WASTE DETECTED - ");
        return;
    }

    println!("\n - LEAN SOLUTIONS - \n");
    print!("{}", render_table(&tables.solutions));
    println!("\n - WASTE PRIORITY RANKING (DECISION VIEW) - \n");
    print!("{}", render_table(&tables.priority));
}
