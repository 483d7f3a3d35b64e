use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// RUST_LOG wins over the configured level when both are present
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init so a second call (tests, embedding) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
