use clap::Parser;
use ridb_enricher::cli::{run, Cli};
use ridb_enricher::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
