use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sql_filter_audit::{logtext, run_audit, AuditOptions};

#[derive(Parser)]
#[command(name = "sql-filter-audit")]
#[command(author, version, about = "Audits BI-captured SQL query logs for mandatory filter usage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a JSON row batch and attach commentary to each row
    Audit {
        /// Path to the JSON row batch file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the audited batch (defaults to <input>.audited.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding per-source mandatory filter lists (<source>.txt)
        #[arg(short, long)]
        filters_dir: PathBuf,

        /// JSON file mapping SQL filter names to display labels
        #[arg(long)]
        display_names: Option<PathBuf>,

        /// JSON file mapping source identities to known-issue references
        #[arg(long)]
        known_issues: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Extract the physical and logical SQL from a saved query-log capture
    Extract {
        /// Path to the saved log capture text file
        #[arg(short, long)]
        capture: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            input,
            output,
            filters_dir,
            display_names,
            known_issues,
            verbose,
        } => {
            let options = AuditOptions {
                input_path: input,
                output_path: output,
                filters_dir,
                display_names_path: display_names,
                known_issues_path: known_issues,
                verbose,
            };

            run_audit(options)?;
        }
        Commands::Extract { capture } => {
            let page_text = std::fs::read_to_string(&capture)
                .with_context(|| format!("Failed to read log capture: {}", capture.display()))?;

            match logtext::extract_physical_sql(&page_text) {
                Some(sql) => println!("-- Physical SQL --\n{}\n", sql),
                None => println!("-- Physical SQL --\n(none found)\n"),
            }
            match logtext::extract_logical_sql(&page_text) {
                Some(sql) => println!("-- Logical SQL --\n{}", sql),
                None => println!("-- Logical SQL --\n(none found)"),
            }
        }
    }

    Ok(())
}
