// stocksql: offline migration utilities for the stock database.
// Two batch jobs: extract structure SQL from a full dump, and turn a
// delimited product list into INSERT statements.

use clap::Parser;
use stocksql::cli::{self, Cli};
use stocksql::logger;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    // Initialize logging based on --debug.
    logger::set_debug(cli.debug);

    let summary = cli::run(&cli)?;
    println!("{}", summary);
    Ok(())
}
