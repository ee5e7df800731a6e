use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Console logging; `RUST_LOG` overrides the default `roster_index=info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roster_index=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
