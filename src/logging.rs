use std::sync::Once;

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Defaults to `info` for this crate and `warn` for everything else; `RUST_LOG`
/// overrides it. Calling this more than once is a no-op.
pub fn init() {
    INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,kopeck=info"));

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    });
}
