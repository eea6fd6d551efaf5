//! Scoreboard CLI
//!
//! Command-line interface to the student records endpoint:
//! - List records
//! - Create, update and delete records
//! - Export to CSV

use anyhow::Context;
use clap::{Parser, Subcommand};
use scoreboard::config::Config;
use scoreboard::export::CsvStyle;
use scoreboard::gateway::{Gateway, HttpGateway, InMemoryGateway};
use scoreboard::home::{HomeController, HomeState, SubmitAction};
use scoreboard::logging::init_tracing;
use scoreboard::records::{Scores, StudentRecord};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "scoreboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Student score records from the command line")]
#[command(long_about = "Scoreboard reads and edits the student score sheet behind a records endpoint.\nScores left blank are sent as 0.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Records endpoint URL (overrides config)
    #[arg(long, global = true)]
    pub gateway_url: Option<String>,

    /// Config file (default: search the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Run against a local in-memory sheet with sample rows
    #[arg(long, global = true)]
    pub demo: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all records
    List,

    /// Create a record
    Create {
        /// Register number
        register_number: String,
        /// Student name
        name: String,
        #[command(flatten)]
        scores: ScoreArgs,
    },

    /// Replace the four scores of a record
    UpdateScore {
        /// Register number
        register_number: String,
        #[command(flatten)]
        scores: ScoreArgs,
    },

    /// Replace the assignment text of a record
    UpdateAssignment {
        /// Register number
        register_number: String,
        /// Assignment text (empty clears it)
        #[arg(default_value = "")]
        assignment: String,
    },

    /// Delete a record
    Delete {
        /// Register number
        register_number: String,
    },

    /// Export records as CSV
    Export {
        /// Output file or directory (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// CSV style (verbatim, rfc4180)
        #[arg(long)]
        style: Option<CsvStyle>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Raw score text, coerced the same way as the dashboard form
#[derive(clap::Args)]
pub struct ScoreArgs {
    #[arg(short = 'd', long = "d", default_value = "")]
    pub d: String,
    #[arg(short = 's', long = "s", default_value = "")]
    pub s: String,
    #[arg(short = 'c', long = "c", default_value = "")]
    pub c: String,
    #[arg(short = 'i', long = "i", default_value = "")]
    pub i: String,
}

impl ScoreArgs {
    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("d", self.d.as_str()),
            ("s", self.s.as_str()),
            ("c", self.c.as_str()),
            ("i", self.i.as_str()),
        ]
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.gateway_url {
        config.gateway.url = url.clone();
    }

    init_tracing(&config.logging, "");

    let gateway: Arc<dyn Gateway> = if cli.demo {
        Arc::new(InMemoryGateway::with_records(demo_records()))
    } else {
        Arc::new(HttpGateway::new(config.gateway.clone()).context("building gateway client")?)
    };

    let export_style = match &cli.command {
        Commands::Export { style: Some(style), .. } => *style,
        _ => config.export.style,
    };
    let home = HomeController::new(gateway).with_export_style(export_style);

    let result = match cli.command {
        Commands::List => home.refresh().await,

        Commands::Create {
            register_number,
            name,
            scores,
        } => {
            home.set_field("registerNumber", register_number).await?;
            home.set_field("name", name).await?;
            for (field, value) in scores.fields() {
                home.set_field(field, value).await?;
            }
            home.submit(SubmitAction::Create).await
        }

        Commands::UpdateScore {
            register_number,
            scores,
        } => {
            home.set_field("registerNumber", register_number).await?;
            for (field, value) in scores.fields() {
                home.set_field(field, value).await?;
            }
            home.submit(SubmitAction::UpdateScore).await
        }

        Commands::UpdateAssignment {
            register_number,
            assignment,
        } => {
            home.set_field("registerNumber", register_number).await?;
            home.set_field("assignment", assignment).await?;
            home.submit(SubmitAction::UpdateAssignment).await
        }

        Commands::Delete { register_number } => home.delete_row(&register_number).await,

        Commands::Export { output, .. } => {
            home.refresh().await?;
            return export(&home, output).await;
        }

        Commands::Config { output } => return write_default_config(output.as_ref()),
    };

    if let Err(e) = result {
        eprintln!("Request failed: {}", e);
        if !cli.demo {
            eprintln!();
            eprintln!("Gateway: {}", config.gateway.url);
        }
        std::process::exit(1);
    }

    let state = home.snapshot().await;
    report_rejected(&state);
    print_records(&home, &state, &cli.format).await
}

async fn export(home: &HomeController<dyn Gateway>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(export) = home.export().await? else {
        eprintln!("No records to export.");
        return Ok(());
    };

    match output {
        Some(path) => {
            let written = export.write_to(&path)?;
            println!("Exported {} records to {:?}", export.rows, written);
        }
        None => {
            println!("{}", export.content);
        }
    }
    Ok(())
}

async fn print_records(
    home: &HomeController<dyn Gateway>,
    state: &HomeState,
    format: &str,
) -> anyhow::Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&state.records)?);
        }
        "csv" => {
            if let Some(export) = home.export().await? {
                println!("{}", export.content);
            }
        }
        _ => {
            print!("{}", home.table().await.render_text());
        }
    }
    Ok(())
}

fn report_rejected(state: &HomeState) {
    if state.rejected.is_empty() {
        return;
    }

    eprintln!("Skipped {} malformed rows:", state.rejected.len());
    for rejected in state.rejected.iter().take(10) {
        eprintln!("  row {}: {}", rejected.index, rejected.reason);
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = scoreboard::config::generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

fn demo_records() -> Vec<StudentRecord> {
    vec![
        StudentRecord::new("0042", "Asha Rao", Scores::new(8.0, 7.0, 9.0, 6.0), "Essay"),
        StudentRecord::new("0107", "Lin Chen", Scores::new(6.5, 8.0, 7.0, 9.0), ""),
        StudentRecord::new("0311", "Tomas Berg", Scores::new(9.0, 9.0, 8.0, 7.5), "Lab report"),
    ]
}
