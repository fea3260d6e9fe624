use anyhow::Result;
use clap::Parser;

use fmtrun::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run().await
}
