use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod config;
mod dashboard;
mod export;
mod session;
mod state;
mod summary;

use config::Config;
use export::{ExportSettings, export_month, print_outcomes};
use session::Session;

const NO_CSV: &str = "Please provide a CSV file to begin";
const NO_DATA: &str = "No transactions with a valid date and amount.";

#[derive(Parser, Debug)]
#[command(
    name = "budget",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUDGET_BUILD_SHA"), ")"),
    about = "Monthly spending summaries, charts and exports from a ledger CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Input {
    /// Ledger CSV with date, category and amount columns
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the months present in the ledger
    Months {
        #[command(flatten)]
        input: Input,
    },

    /// Print the month's total, categories, trend and income/expense split
    Summary {
        #[command(flatten)]
        input: Input,

        /// Month as YYYY-MM (default: earliest in the file)
        #[arg(long)]
        month: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write the filtered CSV, the summary PDF and SVG charts
    Export {
        #[command(flatten)]
        input: Input,

        /// Month as YYYY-MM (default: earliest in the file)
        #[arg(long)]
        month: Option<String>,

        /// Output directory (default: report.output_dir from config)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Skip the SVG charts
        #[arg(long)]
        no_charts: bool,
    },

    /// Interactive terminal dashboard
    Dashboard {
        #[command(flatten)]
        input: Input,

        /// Month as YYYY-MM (default: earliest in the file)
        #[arg(long)]
        month: Option<String>,
    },

    /// Manage ~/.budget/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    let dashboard = matches!(cli.command, Command::Dashboard { .. });
    init_logging(&cfg, dashboard)?;

    match cli.command {
        Command::Months { input } => {
            let Some(session) = open(&input)? else {
                return Ok(());
            };
            session.warn_rejected();
            let periods = budget_core::list_periods(&session.report().records);
            if periods.is_empty() {
                println!("{NO_DATA}");
            }
            for p in periods {
                println!("{p}");
            }
        }

        Command::Summary { input, month, json } => {
            let Some(session) = open(&input)? else {
                return Ok(());
            };
            session.warn_rejected();
            let Some(view) = view_for(&session, month.as_deref())? else {
                println!("{NO_DATA}");
                return Ok(());
            };
            if json {
                let out = summary::SummaryJson::new(&view, session.report().rejected_count());
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", summary::render_text(&view, &cfg.report.currency_symbol));
            }
        }

        Command::Export {
            input,
            month,
            out,
            no_charts,
        } => {
            let Some(session) = open(&input)? else {
                return Ok(());
            };
            session.warn_rejected();
            let Some(view) = view_for(&session, month.as_deref())? else {
                println!("{NO_DATA}");
                return Ok(());
            };
            let settings = export_settings(&cfg, out, !no_charts);
            let failed = print_outcomes(&export_month(&view, &settings));
            if failed > 0 {
                anyhow::bail!("{failed} export(s) failed");
            }
        }

        Command::Dashboard { input, month } => {
            let Some(session) = open(&input)? else {
                return Ok(());
            };
            let period = session.resolve_period(month.as_deref())?;
            let app = dashboard::App::new(
                session,
                period,
                export_settings(&cfg, None, true),
                cfg.report.currency_symbol.clone(),
            );
            dashboard::run_dashboard(app)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// `None` when no CSV was given; the prompt is printed instead.
fn open(input: &Input) -> Result<Option<Session>> {
    match &input.csv {
        None => {
            println!("{NO_CSV}");
            Ok(None)
        }
        Some(path) => Session::open(path).map(Some),
    }
}

fn view_for(session: &Session, month: Option<&str>) -> Result<Option<budget_report::DashboardView>> {
    let period = session.resolve_period(month)?;
    let report = session.report();
    Ok(period.map(|p| budget_report::DashboardView::compute(&report.records, &report.schema, p)))
}

fn export_settings(cfg: &Config, out: Option<PathBuf>, charts: bool) -> ExportSettings {
    ExportSettings {
        out_dir: out.unwrap_or_else(|| cfg.report.output_dir.clone()),
        document: cfg.document_options(),
        chart_size: cfg.chart_size(),
        charts,
    }
}

/// RUST_LOG wins over the config's `log_level`. The dashboard owns the
/// terminal, so its logs go to a file.
fn init_logging(cfg: &Config, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_level.as_str()));

    if to_file {
        let path = state::dashboard_log_path()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
