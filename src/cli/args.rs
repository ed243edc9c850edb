use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::LayerKind;

#[derive(Parser)]
#[command(name = "airq-map")]
#[command(about = "Keeps a live air-quality marker layer in sync with a station collection")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file [default: airq-map.toml when present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Record store base URL")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Collection holding the station records")]
    pub collection: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh the marker layer on a fixed interval until interrupted
    Watch {
        #[arg(short, long, help = "Directory for markers.geojson and status.json")]
        output_dir: Option<PathBuf>,

        #[arg(long, value_enum)]
        layer: Option<LayerKind>,

        #[arg(long, help = "Refresh interval in milliseconds")]
        interval_ms: Option<u64>,
    },

    /// Run a single refresh cycle and print its report
    Once {
        #[arg(short, long, help = "Directory for markers.geojson and status.json")]
        output_dir: Option<PathBuf>,
    },

    /// Import a JSON dump of OpenAQ rows into the collection
    Import {
        #[arg(short, long, help = "JSON array of OpenAQ rows")]
        input: PathBuf,

        #[arg(short, long, help = "Hide the progress bar")]
        quiet: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_watch() {
        let cli = Cli::try_parse_from([
            "airq-map",
            "--base-url",
            "http://store:8090",
            "watch",
            "--layer",
            "flat",
            "-o",
            "/srv/map",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://store:8090"));
        match cli.command {
            Commands::Watch {
                output_dir, layer, ..
            } => {
                assert_eq!(output_dir, Some(PathBuf::from("/srv/map")));
                assert_eq!(layer, Some(LayerKind::Flat));
            }
            _ => panic!("expected watch"),
        }
    }
}
