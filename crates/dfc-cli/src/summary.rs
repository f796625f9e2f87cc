use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use dfc_core::{ComparisonReport, SkipReason};
use dfc_stats::TestResult;

use crate::commands::CompareRun;

pub fn print_summary(run: &CompareRun) {
    let report = &run.report;
    println!("{}", report.title);
    println!("{}", cards_table(report));

    if report.fields.is_empty() {
        println!("No comparable fields shared by all datasets.");
    } else {
        println!("{}", tests_table(report));
    }

    if !report.insights.is_empty() {
        println!();
        println!("Key insights:");
        for insight in &report.insights {
            println!("- {insight}");
        }
    }

    if !report.skipped_fields.is_empty() {
        println!();
        println!("Skipped fields:");
        for skipped in &report.skipped_fields {
            println!("- {}: {}", skipped.field, skip_reason(&skipped.reason));
        }
    }

    if let Some(path) = &run.output {
        println!();
        println!("Report: {}", path.display());
    }

    if !run.failures.is_empty() {
        eprintln!("Files not loaded:");
        for failure in &run.failures {
            eprintln!("- {}: {}", failure.path.display(), failure.error);
        }
    }
}

fn cards_table(report: &ComparisonReport) -> Table {
    let mut table = Table::new();
    table.set_header(
        report
            .summary_cards
            .iter()
            .map(|card| header_cell(&card.title))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    table.add_row(
        report
            .summary_cards
            .iter()
            .map(|card| Cell::new(&card.value).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table.add_row(
        report
            .summary_cards
            .iter()
            .map(|card| dim_cell(&card.description))
            .collect::<Vec<_>>(),
    );
    table
}

fn tests_table(report: &ComparisonReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Test"),
        header_cell("Statistic"),
        header_cell("p-value"),
        header_cell("Significant"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);

    let mut significant = 0usize;
    let mut total = 0usize;
    for field in &report.fields {
        if field.tests.is_empty() {
            table.add_row(vec![
                field_cell(&field.field),
                Cell::new(field.data_type.as_str()),
                dim_cell("no test"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
            continue;
        }
        for (idx, test) in field.tests.iter().enumerate() {
            total += 1;
            if test.significant {
                significant += 1;
            }
            let (name, data_type) = if idx == 0 {
                (field_cell(&field.field), Cell::new(field.data_type.as_str()))
            } else {
                (dim_cell(""), dim_cell(""))
            };
            table.add_row(vec![
                name,
                data_type,
                Cell::new(&test.test_name),
                Cell::new(format_statistic(test.statistic)),
                p_value_cell(test),
                significant_cell(test.significant),
            ]);
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!("{total} tests")).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(significant, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn skip_reason(reason: &SkipReason) -> String {
    match reason {
        SkipReason::EmptyColumn { dataset } => format!("no values in dataset {dataset}"),
        SkipReason::InsufficientData { usable } => {
            format!("only {usable} usable numeric sample(s), need at least 2")
        }
    }
}

fn format_statistic(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.4}")
    }
}

fn p_value_cell(test: &TestResult) -> Cell {
    if !test.has_p_value() {
        return dim_cell("n/a");
    }
    let text = if test.p_value < 1e-4 {
        format!("{:.2e}", test.p_value)
    } else {
        format!("{:.4}", test.p_value)
    };
    if test.significant {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text)
    }
}

fn significant_cell(significant: bool) -> Cell {
    if significant {
        Cell::new("yes")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("no")
    }
}

fn field_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_render_with_four_decimals() {
        assert_eq!(format_statistic(0.123_456), "0.1235");
        assert_eq!(format_statistic(f64::NAN), "NaN");
    }

    #[test]
    fn skip_reasons_read_naturally() {
        let reason = SkipReason::EmptyColumn {
            dataset: "north".to_string(),
        };
        assert_eq!(skip_reason(&reason), "no values in dataset north");
    }
}
