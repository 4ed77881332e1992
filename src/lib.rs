pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::{Explorer, Selection, dataset};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// A command that needs the sales dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Overview {
        export_dir: Option<String>,
    },
    Areas,
    Localities {
        area: String,
    },
    Streets {
        area: String,
        locality: String,
    },
    Explore {
        area: String,
        locality: Option<String>,
        street: Option<String>,
        rows: Option<usize>,
        export_dir: Option<String>,
    },
    Browse,
}

/// Loads config and dataset, then runs `command`.
///
/// `data_path` overrides the dataset location from the config.
pub fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    data_path: Option<&str>,
) -> Result<()> {
    info!("House price explorer starting...");

    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(path) = data_path {
        config.data_path = Some(path.to_string());
    }
    debug!("Loaded config: {config:#?}");

    let data_path = config.data_path();
    let spinner = cli::ui::new_spinner("Loading sales data...");
    let loaded = dataset::load(&data_path);
    spinner.finish_and_clear();
    let dataset = loaded.with_context(|| {
        format!(
            "Could not load sales data; check data_path in your config or pass --data-path (tried {})",
            data_path.display()
        )
    })?;

    let explorer = Explorer::new(
        Arc::new(dataset),
        config.region.clone(),
        config.currency_symbol.clone(),
    );
    let export_dir = |cli_dir: Option<String>| -> Option<PathBuf> {
        cli_dir.or_else(|| config.export_dir.clone()).map(PathBuf::from)
    };

    match command {
        AppCommand::Overview { export_dir: dir } => {
            cli::overview::run(&explorer, export_dir(dir).as_deref())
        }
        AppCommand::Areas => cli::listing::run_areas(&explorer),
        AppCommand::Localities { area } => cli::listing::run_localities(&explorer, &area),
        AppCommand::Streets { area, locality } => {
            cli::listing::run_streets(&explorer, &area, &locality)
        }
        AppCommand::Explore {
            area,
            locality,
            street,
            rows,
            export_dir: dir,
        } => {
            let selection =
                Selection::new(Some(&area), locality.as_deref(), street.as_deref())?;
            cli::explore::run(
                &explorer,
                &selection,
                rows.unwrap_or(config.raw_row_limit),
                export_dir(dir).as_deref(),
            )
        }
        AppCommand::Browse => cli::browse::run(&explorer, config.raw_row_limit),
    }
}
