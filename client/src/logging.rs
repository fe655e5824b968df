//! Tracing setup for the command-line client

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for the command-line client.
///
/// Events go to stderr so command output on stdout stays clean. `RUST_LOG`
/// overrides the default directives.
pub fn init_logging(verbose: bool) {
    let directives = if verbose {
        "cropkeeper=debug,cropkeeper_client=debug"
    } else {
        "cropkeeper=warn,cropkeeper_client=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| directives.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
