use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber for the CLI.
///
/// `RUST_LOG` wins when set; otherwise `recipebook=debug` with `-v` and
/// `recipebook=info` without. Diagnostics go to stderr so they never
/// interleave with the menu on stdout.
pub fn init(verbose: bool) {
    let default = if verbose {
        "recipebook=debug,info"
    } else {
        "recipebook=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
