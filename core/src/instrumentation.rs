use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "info";

pub fn init_instrumentation() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_level(true)
            .finish();

        // A host that already installed its own subscriber keeps it
        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Tracing subscriber already set: {err}");
        }
    });
}
