use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use hpx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Path to the sales data file, overriding the configuration
    #[arg(short, long, global = true)]
    data_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for hpx::AppCommand {
    fn from(cmd: Commands) -> hpx::AppCommand {
        match cmd {
            Commands::Overview { export_dir } => hpx::AppCommand::Overview { export_dir },
            Commands::Areas => hpx::AppCommand::Areas,
            Commands::Localities { area } => hpx::AppCommand::Localities { area },
            Commands::Streets { area, locality } => hpx::AppCommand::Streets { area, locality },
            Commands::Explore {
                area,
                locality,
                street,
                rows,
                export_dir,
            } => hpx::AppCommand::Explore {
                area,
                locality,
                street,
                rows,
                export_dir,
            },
            Commands::Browse => hpx::AppCommand::Browse,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the distribution of sale prices in every area
    Overview {
        /// Write the chart description as JSON into this directory
        #[arg(long)]
        export_dir: Option<String>,
    },
    /// List the areas in the dataset
    Areas,
    /// List the localities within an area
    Localities {
        #[arg(short, long)]
        area: String,
    },
    /// List the streets within a locality
    Streets {
        #[arg(short, long)]
        area: String,
        #[arg(short, long)]
        locality: String,
    },
    /// Show metrics, charts and records for an area, locality or street
    Explore {
        #[arg(short, long)]
        area: String,
        #[arg(short, long)]
        locality: Option<String>,
        /// Requires --locality
        #[arg(short, long, requires = "locality")]
        street: Option<String>,
        /// Number of raw records to show
        #[arg(short, long)]
        rows: Option<usize>,
        /// Write the chart descriptions as JSON into this directory
        #[arg(long)]
        export_dir: Option<String>,
    },
    /// Pick an area, locality and street interactively
    Browse,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => hpx::cli::setup::setup(cli.config_path.as_deref()),
        Some(cmd) => hpx::run_command(
            cmd.into(),
            cli.config_path.as_deref(),
            cli.data_path.as_deref(),
        ),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
