use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use inventory_cli::workflow::CleanOutcome;

pub fn print_summary(outcome: &CleanOutcome) {
    for path in &outcome.written {
        println!("Wrote: {}", path.display());
    }
    let stats = &outcome.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let rows = [
        ("Rows processed", stats.total_rows, None),
        ("Rows cleaned", stats.rows_cleaned, Some(Color::Green)),
        ("Duplicates removed", stats.duplicates_removed, Some(Color::Yellow)),
        ("Rows dropped", stats.rows_skipped, Some(Color::Red)),
        ("Blank rows ignored", stats.blank_rows, None),
        ("Defaults applied", stats.defaults_applied, None),
        ("Normalizations", stats.normalizations, None),
        ("Unit decisions", stats.user_decisions, None),
        ("Warnings", stats.warnings, Some(Color::Yellow)),
        ("Errors", stats.errors, Some(Color::Red)),
    ];
    for (label, count, color) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count, color)]);
    }
    table.add_row(vec![
        Cell::new("De-duplication efficiency")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.dedup_efficiency_label()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Option<Color>) -> Cell {
    match color {
        Some(color) if count > 0 => Cell::new(count).fg(color).add_attribute(Attribute::Bold),
        _ if count == 0 => dim_cell(count),
        _ => Cell::new(count),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
