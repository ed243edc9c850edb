use airq_map::cli::{init_logging, run, Cli};
use anyhow::Context;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli).await.context("airq-map failed")
}
