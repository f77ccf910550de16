use anyhow::Result;
use clap::Parser;
use kopeck::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    kopeck::logging::init();
    let cli = Cli::parse();
    cli.run().await
}
