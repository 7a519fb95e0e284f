mod handlers;
pub mod parse;

use clap::Parser;
pub use handlers::synthesize;
pub use parse::Cli;
use tracing_subscriber::EnvFilter;

use crate::core::error::GraphError;

/// Logs go to stderr; `RUST_LOG` wins over `--debug`.
fn init_tracing(debug: bool) {
    let fallback = if debug { "facet_box=debug" } else { "facet_box=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> Result<(), GraphError> {
    let cli = parse::Cli::parse();
    init_tracing(cli.debug);
    match cli.cmd {
        parse::Command::Plot(a) => handlers::plot(&a),
        parse::Command::Reshape(a) => handlers::reshape(&a),
        parse::Command::Demo(a) => handlers::demo(&a),
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}
