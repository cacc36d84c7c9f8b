use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber once.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` turns on debug output for
/// the egg crates and nothing is logged without it.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) if verbose => EnvFilter::new("egg_interpreter=debug,egg_parser=debug,egg_repl=debug"),
            Err(_) => return,
        };

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
