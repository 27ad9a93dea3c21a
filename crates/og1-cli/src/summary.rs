use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use og1_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Class"),
        header_cell("Read"),
        header_cell("Written"),
        header_cell("Rejected"),
        header_cell("Corrections"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for report in &result.reports {
        table.add_row(vec![
            Cell::new(report.class.label())
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(report.read),
            Cell::new(report.written),
            count_cell(report.rejected.len(), Color::Red),
            count_cell(report.correction_count(), Color::Green),
            count_cell(report.warning_count(), Color::Yellow),
        ]);
    }
    println!("{table}");
    print_rejection_table(result);

    if result.dry_run {
        println!("Dry run: no validated documents written");
    }
    for path in &result.outputs {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &result.report_path {
        println!("Triage report: {}", path.display());
    }
    println!("Completed in {:.2?}", result.elapsed);
}

fn print_rejection_table(result: &RunResult) {
    let rejected: Vec<_> = result
        .reports
        .iter()
        .flat_map(|report| report.rejected.iter().map(move |item| (report.class, item)))
        .collect();
    if rejected.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Class"),
        header_cell("Record"),
        header_cell("Category"),
        header_cell("Reason"),
    ]);
    apply_summary_table_style(&mut table);
    for (class, item) in rejected {
        table.add_row(vec![
            Cell::new(class.label()),
            Cell::new(&item.record).add_attribute(Attribute::Bold),
            Cell::new(&item.category).fg(Color::Red),
            Cell::new(&item.reason),
        ]);
    }
    println!();
    println!("Rejected:");
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}
