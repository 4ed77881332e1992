use super::{export, render, ui};
use crate::core::Explorer;
use anyhow::Result;
use std::path::Path;

pub fn run(explorer: &Explorer, export_dir: Option<&Path>) -> Result<()> {
    let chart = explorer.overview();
    let symbol = explorer.currency_symbol();

    println!(
        "{}",
        render::render_chart(&chart, "Area", &|v| ui::format_currency(v, symbol))
    );

    if let Some(dir) = export_dir {
        let written = export::export_charts(dir, &[("area_price_distribution", &chart)])?;
        for path in written {
            println!(
                "\n{}",
                ui::style_text(
                    &format!("Exported chart to {}", path.display()),
                    ui::StyleType::Subtle
                )
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dataset, PropertyType, SaleRecord};
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[test]
    fn test_overview_export() -> Result<()> {
        let dataset = Dataset::from_records(vec![SaleRecord {
            sale_date: NaiveDate::from_ymd_opt(2023, 8, 8).unwrap(),
            sale_price: 275_000,
            property_type: PropertyType::SemiDetached,
            area: "Monmouthshire".to_string(),
            locality: Some("Abergavenny".to_string()),
            street: None,
        }]);
        let explorer = Explorer::new(Arc::new(dataset), "Wales", "£");
        let dir = tempfile::TempDir::new()?;

        run(&explorer, Some(dir.path()))?;

        let json = std::fs::read_to_string(dir.path().join("area_price_distribution.json"))?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["body"]["type"], "ridge");
        assert_eq!(value["size"]["width"], 950);
        assert_eq!(value["body"]["traces"][0]["label"], "Monmouthshire");
        Ok(())
    }
}
