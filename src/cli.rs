// Command-line surface and job orchestration. Each subcommand is one
// batch job: read the input file whole, transform in memory, write the
// output file, return a one-line summary for stdout.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;

use crate::generator;
use crate::logger;
use crate::parser::products::ProductParser;
use crate::parser::structure::StructureParser;
use crate::progress::ProgressManager;

type JobResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Enable debug logging (disables progress bars).
    #[arg(long)]
    pub debug: bool,

    /// Write a run report JSON to file.
    #[arg(long)]
    pub report_json: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract table, view and constraint definitions from a SQL dump.
    Extract {
        /// Input dump file.
        #[arg(default_value = "focolari_db.sql")]
        dump: String,

        /// Output structure file.
        #[arg(default_value = "structure.sql")]
        output: String,
    },

    /// Convert a delimited product list into SQL INSERT statements.
    Import {
        /// Input product list file.
        #[arg(default_value = "products_data.txt")]
        products: String,

        /// Output SQL file.
        #[arg(default_value = "import_products.sql")]
        output: String,
    },
}

// Run the selected job to completion. A missing or unreadable input file
// aborts the run; parse-level anomalies never do.
pub fn run(cli: &Cli) -> JobResult<String> {
    let progress = ProgressManager::new(!cli.debug);

    match &cli.command {
        Command::Extract { dump, output } => {
            logger::debug(&format!("run: extracting structure from {}", dump));
            let content = fs::read_to_string(dump)?;
            let set = StructureParser::new().extract(&content);

            let bar = progress.new_statement_bar(set.statement_count() as u64);
            let (sql, report) = generator::render_structure(&set, bar.as_ref());
            fs::write(output, sql)?;
            write_report(cli.report_json.as_deref(), &report)?;

            Ok(format!(
                "Extracted {} tables, {} views, {} constraints -> {}",
                report.tables, report.views, report.constraints, output
            ))
        }

        Command::Import { products, output } => {
            logger::debug(&format!("run: importing products from {}", products));
            let content = fs::read_to_string(products)?;

            let parse_bar =
                progress.new_file_bar(products, &format!("Parsing {}", basename(products)));
            let list = ProductParser::new().parse(&content, parse_bar.as_ref());

            let emit_bar = progress
                .new_statement_bar((list.rayon_codes.len() + list.products.len()) as u64);
            let (sql, report) = generator::render_import(&list, emit_bar.as_ref());
            fs::write(output, sql)?;
            write_report(cli.report_json.as_deref(), &report)?;

            Ok(format!(
                "Generated SQL for {} rayons and {} products -> {}",
                report.rayons, report.products, output
            ))
        }
    }
}

// Write the run report JSON if --report-json was given.
fn write_report<T: serde::Serialize>(path: Option<&str>, report: &T) -> JobResult<()> {
    if let Some(path) = path {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(path, json)?;
        logger::debug(&format!("run: report written to {}", path));
    }
    Ok(())
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}
