use super::ui;
use crate::core::{Explorer, LOCALITY_NULL_VALUE, STREET_NULL_VALUE};
use anyhow::Result;
use comfy_table::{Cell, Color};

pub fn run_areas(explorer: &Explorer) -> Result<()> {
    println!("{}", display_choices("Area", &explorer.areas()));
    Ok(())
}

pub fn run_localities(explorer: &Explorer, area: &str) -> Result<()> {
    println!(
        "{}",
        display_choices("Locality", &explorer.localities(Some(area)))
    );
    Ok(())
}

pub fn run_streets(explorer: &Explorer, area: &str, locality: &str) -> Result<()> {
    println!(
        "{}",
        display_choices("Street", &explorer.streets(Some(area), Some(locality)))
    );
    Ok(())
}

/// Numbered table of selector choices; placeholder entries are dimmed.
pub fn display_choices(header: &str, choices: &[String]) -> String {
    if choices.is_empty() {
        return ui::style_text(
            &format!("No {} choices available", header.to_lowercase()),
            ui::StyleType::Subtle,
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("#"), ui::header_cell(header)]);
    for (i, choice) in choices.iter().enumerate() {
        let cell = if choice == LOCALITY_NULL_VALUE || choice == STREET_NULL_VALUE {
            Cell::new(choice).fg(Color::DarkGrey)
        } else {
            Cell::new(choice)
        };
        table.add_row(vec![ui::number_cell(i.to_string()), cell]);
    }
    table.to_string()
}
