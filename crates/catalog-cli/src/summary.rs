use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use catalog_core::ValidationReport;
use catalog_map::{ConfidenceLevel, ConfidenceThresholds, MappingSummary, SuggestionResult};
use catalog_model::{Dataset, OutputRow};
use catalog_schema::Schema;
use catalog_variants::ManufacturerGroup;

const SAMPLE_WIDTH: usize = 40;

pub fn print_fields(schema: &Schema) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Name"),
        header_cell("Required"),
        header_cell("Validator"),
        header_cell("Example"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in schema.list_fields() {
        table.add_row(vec![
            Cell::new(&field.id).add_attribute(Attribute::Bold),
            Cell::new(&field.display_name),
            if field.required {
                Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                dim_cell("-")
            },
            field
                .validator
                .map_or_else(|| dim_cell("-"), |v| Cell::new(v.label())),
            field
                .validator
                .map_or_else(|| dim_cell("-"), |v| dim_cell(v.example())),
        ]);
    }
    println!("{table}");

    let mut linked = Table::new();
    linked.set_header(vec![
        header_cell("Linked field"),
        header_cell("Name"),
        header_cell("Linked to"),
        header_cell("Options"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut linked);
    for field in schema.list_linked_fields() {
        linked.add_row(vec![
            Cell::new(&field.id).add_attribute(Attribute::Bold),
            Cell::new(&field.display_name),
            field
                .linked_field
                .as_deref()
                .map_or_else(|| dim_cell("-"), |f| Cell::new(f).fg(Color::Blue)),
            field
                .options
                .as_ref()
                .map_or_else(|| dim_cell("free text"), |o| Cell::new(o.join(", "))),
            field
                .default_value
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!();
    println!("{linked}");
}

pub fn print_columns(dataset: &Dataset) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Filled"),
        header_cell("Sample"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (index, column) in dataset.columns.iter().enumerate() {
        let filled = dataset
            .rows
            .iter()
            .filter(|row| row.get(column).is_some_and(|v| !v.is_empty()))
            .count();
        let sample = dataset
            .rows
            .iter()
            .filter_map(|row| row.get(column))
            .find(|v| !v.is_empty())
            .map(|v| truncate(v, SAMPLE_WIDTH));
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(column).add_attribute(Attribute::Bold),
            Cell::new(format!("{filled}/{}", dataset.len())),
            sample.map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

pub fn print_suggestions(result: &SuggestionResult, thresholds: &ConfidenceThresholds) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Target"),
        header_cell("Confidence"),
        header_cell("Level"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for suggestion in &result.suggestions {
        let level = thresholds.categorize(suggestion.confidence);
        table.add_row(vec![
            Cell::new(&suggestion.source_column),
            Cell::new(&suggestion.target_field).fg(Color::Blue),
            Cell::new(format!("{:.2}", suggestion.confidence)),
            level.map_or_else(|| dim_cell("-"), level_cell),
        ]);
    }
    for column in &result.unmatched_columns {
        table.add_row(vec![
            Cell::new(column),
            dim_cell("unmatched"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    println!("{table}");
}

pub fn print_groups(column: &str, groups: &[ManufacturerGroup]) {
    println!("Manufacturer column: {column}");
    if groups.is_empty() {
        println!("No manufacturer id is shared by two or more rows.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Manufacturer id"),
        header_cell("Rows"),
        header_cell("Row numbers"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for group in groups {
        let numbers: Vec<String> = group.rows.iter().map(|i| (i + 1).to_string()).collect();
        table.add_row(vec![
            Cell::new(&group.manufacturer_id).add_attribute(Attribute::Bold),
            Cell::new(group.rows.len()),
            Cell::new(numbers.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_mapping_summary(summary: &MappingSummary) {
    println!(
        "Mapped {}/{} fields ({} with defaults); required {}/{}",
        summary.mapped,
        summary.total_fields,
        summary.defaulted,
        summary.required_covered,
        summary.required_total
    );
    if !summary.is_complete() {
        println!("Missing required: {}", summary.missing_required.join(", "));
    }
}

pub fn print_validation(report: &ValidationReport) {
    if report.is_clean() {
        println!("No validation issues.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    let violations = report
        .rows
        .iter()
        .flat_map(|r| &r.errors)
        .chain(&report.duplicates);
    for violation in violations {
        let value = violation.value.as_str();
        table.add_row(vec![
            Cell::new(violation.row),
            Cell::new(&violation.column).fg(Color::Blue),
            if value.is_empty() {
                dim_cell("(empty)")
            } else {
                Cell::new(truncate(value, SAMPLE_WIDTH))
            },
            Cell::new(&violation.message).fg(Color::Yellow),
        ]);
    }
    println!("{table}");

    let summary = &report.summary;
    println!(
        "{} rows with {} violations, {} duplicate identifiers",
        summary.failing_rows,
        summary.violations,
        report.duplicates.len()
    );
    for (column, count) in &summary.by_column {
        println!("  {column}: {count}");
    }
}

/// Regular rows first, then parents highlighted; at most `limit` rows.
pub fn print_preview(rows: &[OutputRow], columns: &[String], limit: usize) {
    if rows.is_empty() || columns.is_empty() {
        println!("Nothing to preview: no columns are mapped.");
        return;
    }
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(columns.iter().map(|c| header_cell(c)));
    header.push(header_cell("Variants"));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    let regular = rows.iter().filter(|r| !r.is_parent).take(limit);
    let parents = rows.iter().filter(|r| r.is_parent);
    for (index, row) in regular.enumerate() {
        let mut cells = vec![dim_cell(index + 1)];
        cells.extend(columns.iter().map(|c| value_cell(row, c)));
        cells.push(dim_cell("-"));
        table.add_row(cells);
    }
    for row in parents {
        let mut cells = vec![Cell::new("P").fg(Color::Cyan).add_attribute(Attribute::Bold)];
        cells.extend(columns.iter().map(|c| {
            Cell::new(truncate(row.value(c), SAMPLE_WIDTH))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        }));
        cells.push(Cell::new(row.children.join(", ")).fg(Color::Cyan));
        table.add_row(cells);
    }
    println!("{table}");

    let shown = rows.iter().filter(|r| !r.is_parent).count().min(limit);
    let total = rows.iter().filter(|r| !r.is_parent).count();
    if shown < total {
        println!("Showing {shown} of {total} rows.");
    }
}

fn value_cell(row: &OutputRow, column: &str) -> Cell {
    if row.is_present(column) {
        Cell::new(truncate(row.value(column), SAMPLE_WIDTH))
    } else {
        dim_cell("")
    }
}

fn level_cell(level: ConfidenceLevel) -> Cell {
    let color = match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    };
    Cell::new(level.label()).fg(color)
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
