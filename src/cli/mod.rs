pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::run;

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise `info`, or `debug` for this crate with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "info,airq_map=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
