use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};

mod chart;
mod data;
mod models;
mod outcomes;
mod report;

use models::{LevelGroup, OutcomeGroup};

#[derive(Parser)]
#[command(name = "gender-outcome-report")]
#[command(about = "Gender dropout and completion percentages per education level", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print dropout and completion percentages by gender
    Stats {
        #[arg(long)]
        csv: PathBuf,
        /// Restrict output to one level: TÉCNICO, GRADUAÇÃO or PÓS GRADUAÇÃO
        #[arg(long)]
        level: Option<String>,
    },
    /// Write a markdown report plus a Vega-Lite chart spec
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long, default_value = "chart.vl.json")]
        chart: PathBuf,
    },
    /// Write a small sample dataset
    Sample {
        #[arg(long, default_value = "students.csv")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { csv, level } => {
            let records = data::load_records(&csv)?;
            let groups = match level {
                Some(label) => {
                    let group = LevelGroup::parse(&label).with_context(|| {
                        format!(
                            "unknown education level {label:?}, expected TÉCNICO, GRADUAÇÃO or PÓS GRADUAÇÃO"
                        )
                    })?;
                    vec![group]
                }
                None => LevelGroup::ALL.to_vec(),
            };

            for group in groups {
                let rows = outcomes::level_outcomes(&records, group)?;
                println!("{}:", group.label());
                for row in &rows {
                    match row.group {
                        OutcomeGroup::Difference => println!(
                            "- {} / Diferença: {:+.2} p.p. ({:+} registros)",
                            row.outcome.label(),
                            row.percent,
                            row.total
                        ),
                        _ => println!(
                            "- {} / {}: {:.2}% ({} registros)",
                            row.outcome.label(),
                            row.group.code(),
                            row.percent,
                            row.total
                        ),
                    }
                }
            }
        }
        Commands::Report { csv, out, chart } => {
            let records = data::load_records(&csv)?;
            let rows = outcomes::all_level_outcomes(&records)?;

            let markdown = report::build_report(&rows, Utc::now().date_naive());
            std::fs::write(&out, markdown)
                .with_context(|| format!("failed to write {}", out.display()))?;

            let spec = chart::vega_lite_spec(&chart::chart_rows(&rows));
            std::fs::write(&chart, serde_json::to_string_pretty(&spec)?)
                .with_context(|| format!("failed to write {}", chart.display()))?;

            println!("Report written to {}.", out.display());
            println!("Chart spec written to {}.", chart.display());
        }
        Commands::Sample { out } => {
            let written = data::write_sample(&out)?;
            println!("Sample dataset with {written} records written to {}.", out.display());
        }
    }

    Ok(())
}
