use super::{export, render, ui};
use crate::core::{Exploration, Explorer, Selection};
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;
use tracing::info;

impl Exploration<'_> {
    /// Full report: heading, metrics, the three charts and the raw records.
    pub fn display(&self, currency_symbol: &str, row_limit: usize) -> String {
        let currency = |v: f64| ui::format_currency(v, currency_symbol);
        let count = |v: f64| ui::format_thousands(v);

        let mut output = format!("{}\n\n", ui::style_text(&self.heading, ui::StyleType::Title));

        output.push_str(&format!(
            "{} {}    {} {}\n",
            ui::style_text("Number of records:", ui::StyleType::MetricLabel),
            ui::style_text(
                &ui::format_thousands(self.metrics.record_count as f64),
                ui::StyleType::MetricValue
            ),
            ui::style_text("Median sale price:", ui::StyleType::MetricLabel),
            match self.metrics.median_price {
                Some(median) => ui::style_text(&currency(median), ui::StyleType::MetricValue),
                None => ui::style_text("N/A", ui::StyleType::Error),
            }
        ));

        let sections: [(&str, String); 3] = [
            (
                "Transactions over time",
                render::render_chart(&self.transactions, "Year", &count),
            ),
            (
                "Distribution of property type",
                render::render_chart(&self.property_types, "Property type", &count),
            ),
            (
                "Median sale price by property type",
                render::render_chart(&self.median_prices, "Property type", &currency),
            ),
        ];
        for (title, body) in sections {
            output.push_str(&format!(
                "\n{}\n{}\n",
                ui::style_text(title, ui::StyleType::Heading),
                body
            ));
        }

        output.push_str(&format!(
            "\n{}\n{}",
            ui::style_text("Raw data", ui::StyleType::Heading),
            self.display_records(currency_symbol, row_limit)
        ));
        output
    }

    fn display_records(&self, currency_symbol: &str, row_limit: usize) -> String {
        if self.view.is_empty() {
            return ui::style_text("No records match this selection", ui::StyleType::Subtle);
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Sale date"),
            ui::header_cell("Sale price"),
            ui::header_cell("Property type"),
            ui::header_cell("Area"),
            ui::header_cell("Locality"),
            ui::header_cell("Street"),
        ]);
        for record in self.view.iter().take(row_limit) {
            table.add_row(vec![
                Cell::new(record.sale_date.format("%Y-%m-%d")),
                ui::number_cell(ui::format_currency(record.sale_price as f64, currency_symbol)),
                Cell::new(record.property_type),
                Cell::new(&record.area),
                Cell::new(record.locality.as_deref().unwrap_or("")),
                Cell::new(record.street.as_deref().unwrap_or("")),
            ]);
        }

        let mut output = table.to_string();
        if self.view.len() > row_limit {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(
                    &format!(
                        "Showing {} of {} records",
                        row_limit.min(self.view.len()),
                        ui::format_thousands(self.view.len() as f64)
                    ),
                    ui::StyleType::Subtle
                )
            ));
        }
        output
    }
}

pub fn run(
    explorer: &Explorer,
    selection: &Selection,
    row_limit: usize,
    export_dir: Option<&Path>,
) -> Result<()> {
    let Some(exploration) = explorer.explore(selection) else {
        println!("Select an area to explore.");
        return Ok(());
    };
    info!(heading = %exploration.heading, "Displaying exploration");

    println!(
        "{}",
        exploration.display(explorer.currency_symbol(), row_limit)
    );

    if let Some(dir) = export_dir {
        let written = export::export_charts(
            dir,
            &[
                ("transactions_per_year", &exploration.transactions),
                ("property_type_counts", &exploration.property_types),
                ("median_price_by_property_type", &exploration.median_prices),
            ],
        )?;
        println!(
            "\n{}",
            ui::style_text(
                &format!("Exported {} charts to {}", written.len(), dir.display()),
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}
