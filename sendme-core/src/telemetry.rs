use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the `fmt` subscriber with an `EnvFilter` read from `RUST_LOG`,
/// falling back to `default_filter`.
///
/// Returns `false` when a global subscriber was already installed, which
/// lets hosts and tests call this without coordinating.
pub fn init_tracing(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
