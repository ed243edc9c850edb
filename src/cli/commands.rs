use tracing::{info, warn};
use validator::Validate;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::presentation::PresentationLayer;
use crate::processors::Importer;
use crate::readers::{DumpReader, HttpRecordSource};
use crate::scheduler::Scheduler;
use crate::utils::progress::ProgressReporter;
use crate::utils::Settings;

pub async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(collection) = cli.collection {
        settings.collection = collection;
    }

    match cli.command {
        Commands::Watch {
            output_dir,
            layer,
            interval_ms,
        } => {
            if output_dir.is_some() {
                settings.output_dir = output_dir;
            }
            if let Some(layer) = layer {
                settings.layer = layer;
            }
            if let Some(interval_ms) = interval_ms {
                settings.refresh_interval_ms = interval_ms;
            }
            settings.validate()?;

            let source = http_source(&settings)?;
            let scheduler = Scheduler::from_settings(source, &settings);
            let mut presentation = PresentationLayer::from_settings(&settings)?;

            info!(
                store = %scheduler.fetcher().source().records_url(),
                layer = %settings.layer,
                output_dir = ?settings.output_dir,
                "watching collection"
            );
            if settings.output_dir.is_none() {
                warn!("no output directory configured; markers are kept in memory only");
            }

            scheduler.run(&mut presentation, shutdown_signal()).await;
        }

        Commands::Once { output_dir } => {
            if output_dir.is_some() {
                settings.output_dir = output_dir;
            }
            settings.validate()?;

            let source = http_source(&settings)?;
            let scheduler = Scheduler::from_settings(source, &settings);
            let mut presentation = PresentationLayer::from_settings(&settings)?;

            let progress = ProgressReporter::new_spinner("Fetching station records...", false);
            let result = scheduler.run_cycle(&mut presentation).await;
            progress.finish_with_message(&presentation.state().status.to_string());

            let report = result?;
            println!("\n{}", report.generate_summary());
        }

        Commands::Import { input, quiet } => {
            settings.validate()?;

            let rows = DumpReader::read_rows(&input)?;
            println!(
                "Found {} rows in {}. Starting import...",
                rows.len(),
                input.display()
            );

            let importer = Importer::new(http_source(&settings)?, settings.default_parameter.as_str());
            let progress = ProgressReporter::new(rows.len() as u64, "Importing records...", quiet);
            let report = importer.import(&rows, &progress).await;
            progress.finish_with_message("Import complete");

            println!("{}", report.summary());
        }
    }

    Ok(())
}

fn http_source(settings: &Settings) -> Result<HttpRecordSource> {
    HttpRecordSource::new(
        &settings.base_url,
        &settings.collection,
        settings.request_timeout(),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
}
