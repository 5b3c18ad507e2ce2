use std::sync::Once;

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

static INIT: Once = Once::new();

/// Installs the stderr subscriber once; `RUST_LOG` overrides the default level.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already set; keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        tracing::info!("logging initialized twice without panicking");
    }
}
