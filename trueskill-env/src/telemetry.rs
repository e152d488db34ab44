use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

/// Builds a formatting subscriber; `RUST_LOG` overrides the given default filter.
pub fn get_subscriber(
    env_filter: String,
    sink: impl for<'a> MakeWriter<'a> + Send + Sync + 'static,
) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(sink)
        .finish()
}

/// Register a subscriber as global default to process span data.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    set_global_default(subscriber).expect("Failed to set subscriber");
}
