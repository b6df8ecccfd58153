//! Diagnostics output for the binaries.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `RUST_LOG` selects the filter, `warn` when unset; `--verbose` forces
/// `debug` and reports span timings.
pub fn init(verbose: bool) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if verbose {
        builder
            .with_env_filter(EnvFilter::new("debug"))
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        builder.with_env_filter(filter).try_init()
    };

    // A subscriber is already installed when running under a test harness.
    if let Err(e) = result {
        eprintln!("warning: logging not initialised: {e}");
    }
}
