//! Terminal rendering of chart descriptions.
use super::ui;
use crate::core::analytics::median;
use crate::core::chart::{BarSeries, Chart, ChartBody, LineSeries, RidgeSeries};
use comfy_table::Cell;

const SPARKLINE_WIDTH: usize = 40;

/// Renders `chart` as a table. `category` names the first column and
/// `format_value` formats the plotted values.
pub fn render_chart(chart: &Chart, category: &str, format_value: &dyn Fn(f64) -> String) -> String {
    let mut output = String::new();
    if let Some(title) = &chart.title {
        output.push_str(&ui::style_text(title, ui::StyleType::Heading));
        output.push('\n');
    }

    let table = match &chart.body {
        ChartBody::Line(series) => line_table(series, category, value_title(chart), format_value),
        ChartBody::HorizontalBar(series) => {
            bar_table(series, category, value_title(chart), format_value)
        }
        ChartBody::Ridge(series) => ridge_table(series, category, format_value),
    };

    match table {
        Some(table) => output.push_str(&table.to_string()),
        None => output.push_str(&ui::style_text("No data to chart", ui::StyleType::Subtle)),
    }
    output
}

fn value_title(chart: &Chart) -> &str {
    let title = match &chart.body {
        ChartBody::HorizontalBar(_) => chart.x_axis_title.as_deref(),
        _ => chart.y_axis_title.as_deref(),
    };
    title.unwrap_or("Value")
}

fn line_table(
    series: &LineSeries,
    category: &str,
    value_title: &str,
    format_value: &dyn Fn(f64) -> String,
) -> Option<comfy_table::Table> {
    if series.x.is_empty() {
        return None;
    }
    let max = series.y.iter().copied().fold(0.0_f64, f64::max);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(category),
        ui::header_cell(value_title),
        ui::header_cell(""),
    ]);
    for (x, y) in series.x.iter().zip(&series.y) {
        table.add_row(vec![
            Cell::new(format!("{x:.0}")),
            ui::number_cell(format_value(*y)),
            ui::bar_cell(*y, max),
        ]);
    }
    Some(table)
}

fn bar_table(
    series: &BarSeries,
    category: &str,
    value_title: &str,
    format_value: &dyn Fn(f64) -> String,
) -> Option<comfy_table::Table> {
    if series.labels.is_empty() {
        return None;
    }
    let max = series.values.iter().copied().fold(0.0_f64, f64::max);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(category),
        ui::header_cell(value_title),
        ui::header_cell(""),
    ]);
    // Bars are stored bottom to top; print the top bar first.
    for (label, value) in series.labels.iter().zip(&series.values).rev() {
        table.add_row(vec![
            Cell::new(label),
            ui::number_cell(format_value(*value)),
            ui::bar_cell(*value, max),
        ]);
    }
    Some(table)
}

fn ridge_table(
    series: &RidgeSeries,
    category: &str,
    format_value: &dyn Fn(f64) -> String,
) -> Option<comfy_table::Table> {
    if series.traces.is_empty() {
        return None;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(category),
        ui::header_cell("Sales"),
        ui::header_cell("Median"),
        ui::header_cell("Distribution"),
    ]);
    for trace in &series.traces {
        let mut prices: Vec<i64> = trace.samples.iter().map(|s| *s as i64).collect();
        table.add_row(vec![
            Cell::new(&trace.label),
            ui::number_cell(ui::format_thousands(trace.samples.len() as f64)),
            ui::format_optional_cell(median(&mut prices), format_value),
            Cell::new(ui::sparkline(&trace.density, SPARKLINE_WIDTH)),
        ]);
    }
    Some(table)
}
