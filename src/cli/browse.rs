//! Interactive drill-down: area, then locality, then street.
use super::{listing, ui};
use crate::core::{Explorer, Selection};
use anyhow::{Context, Result};
use console::Term;
use std::io::Write;
use tracing::debug;

/// Source of the user's choices.
pub trait Prompter {
    /// Asks for one of `options`. `None` means nothing was chosen.
    fn choose(&mut self, label: &str, options: &[String]) -> Result<Option<String>>;
}

/// Reads choices by number from the terminal.
pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn choose(&mut self, label: &str, options: &[String]) -> Result<Option<String>> {
        self.term.write_line(&listing::display_choices(label, options))?;
        loop {
            self.term.write_str(&format!(
                "{} ",
                ui::style_text(&prompt_text(label), ui::StyleType::MetricLabel)
            ))?;
            let answer = self.term.read_line().context("Failed to read selection")?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>().ok().and_then(|i| options.get(i)) {
                Some(choice) => return Ok(Some(choice.clone())),
                None => self.term.write_line(&ui::style_text(
                    &format!("'{answer}' is not one of the listed numbers"),
                    ui::StyleType::Error,
                ))?,
            }
        }
    }
}

const AREA_LABEL: &str = "Area";

/// A blank area ends the session; a blank locality or street means none.
fn prompt_text(label: &str) -> String {
    let blank = if label == AREA_LABEL {
        "blank to stop"
    } else {
        "blank for none"
    };
    format!("Enter the {} number ({blank}):", label.to_lowercase())
}

pub fn run(explorer: &Explorer, row_limit: usize) -> Result<()> {
    let mut prompter = TermPrompter::new();
    let mut stdout = std::io::stdout();
    run_session(explorer, &mut prompter, &mut stdout, row_limit)
}

/// Repeats the drill-down until no area is chosen.
///
/// Every round starts from the area, so downstream choices never outlive a
/// change upstream.
pub fn run_session(
    explorer: &Explorer,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
    row_limit: usize,
) -> Result<()> {
    loop {
        let Some(area) = prompter.choose(AREA_LABEL, &explorer.areas())? else {
            debug!("No area chosen, ending session");
            return Ok(());
        };

        let localities = explorer.localities(Some(&area));
        let locality = if localities.len() > 1 {
            prompter.choose("Locality", &localities)?
        } else {
            None
        };

        let selection = Selection::new(Some(&area), locality.as_deref(), None)?;
        let streets = explorer.streets(selection.area(), selection.locality());
        let street = if streets.len() > 1 {
            prompter.choose("Street", &streets)?
        } else {
            None
        };

        let selection = Selection::new(Some(&area), selection.locality(), street.as_deref())?;
        if let Some(exploration) = explorer.explore(&selection) {
            writeln!(
                out,
                "{}",
                exploration.display(explorer.currency_symbol(), row_limit)
            )?;
        }
        ui::print_separator();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dataset, LOCALITY_NULL_VALUE, PropertyType, SaleRecord};
    use chrono::NaiveDate;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Answers with scripted option indices and records what it was asked.
    struct ScriptedPrompter {
        answers: VecDeque<Option<usize>>,
        asked: Vec<(String, Vec<String>)>,
    }

    impl Prompter for ScriptedPrompter {
        fn choose(&mut self, label: &str, options: &[String]) -> Result<Option<String>> {
            self.asked.push((label.to_string(), options.to_vec()));
            Ok(self
                .answers
                .pop_front()
                .flatten()
                .and_then(|i| options.get(i).cloned()))
        }
    }

    fn sale(area: &str, locality: &str, street: &str) -> SaleRecord {
        SaleRecord {
            sale_date: NaiveDate::from_ymd_opt(2022, 9, 9).unwrap(),
            sale_price: 180_000,
            property_type: PropertyType::Terraced,
            area: area.to_string(),
            locality: Some(locality.to_string()),
            street: Some(street.to_string()),
        }
    }

    fn explorer() -> Explorer {
        let dataset = Dataset::from_records(vec![
            sale("Cardiff", "Cardiff", "Queen Street"),
            sale("Cardiff", "Penarth", "Plymouth Road"),
            sale("Powys", "Welshpool", "Broad Street"),
        ]);
        Explorer::new(Arc::new(dataset), "Wales", "£")
    }

    #[test]
    fn test_session_drills_down_to_street() -> Result<()> {
        let explorer = explorer();
        let mut prompter = ScriptedPrompter {
            // Cardiff, Penarth, Plymouth Road, then stop.
            answers: VecDeque::from(vec![Some(0), Some(2), Some(1), None]),
            asked: Vec::new(),
        };
        let mut out = Vec::new();

        run_session(&explorer, &mut prompter, &mut out, 10)?;

        let labels: Vec<&str> = prompter.asked.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Area", "Locality", "Street", "Area"]);
        let output = String::from_utf8(out)?;
        assert!(output.contains("Results for Cardiff, Penarth, Plymouth Road"));
        Ok(())
    }

    #[test]
    fn test_placeholder_locality_skips_street() -> Result<()> {
        let explorer = explorer();
        let mut prompter = ScriptedPrompter {
            // Powys, then the locality placeholder, then stop.
            answers: VecDeque::from(vec![Some(1), Some(0), None]),
            asked: Vec::new(),
        };
        let mut out = Vec::new();

        run_session(&explorer, &mut prompter, &mut out, 10)?;

        assert_eq!(prompter.asked[1].1[0], LOCALITY_NULL_VALUE);
        let labels: Vec<&str> = prompter.asked.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Area", "Locality", "Area"]);
        let output = String::from_utf8(out)?;
        assert!(output.contains("Results for Powys"));
        assert!(!output.contains("Results for Powys, "));
        Ok(())
    }

    #[test]
    fn test_prompt_text_depends_on_level() {
        assert_eq!(
            prompt_text("Area"),
            "Enter the area number (blank to stop):"
        );
        assert_eq!(
            prompt_text("Locality"),
            "Enter the locality number (blank for none):"
        );
        assert_eq!(
            prompt_text("Street"),
            "Enter the street number (blank for none):"
        );
    }

    #[test]
    fn test_session_ends_without_area() -> Result<()> {
        let explorer = explorer();
        let mut prompter = ScriptedPrompter {
            answers: VecDeque::from(vec![None]),
            asked: Vec::new(),
        };
        let mut out = Vec::new();

        run_session(&explorer, &mut prompter, &mut out, 10)?;
        assert!(out.is_empty());
        Ok(())
    }
}
