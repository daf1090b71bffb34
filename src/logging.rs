const FILTER_ENV: &str = "RUST_LOG";

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn builder(filter_env: &str) -> env_logger::Builder {
    let env = env_logger::Env::default().filter_or(filter_env, default_filter());

    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp_millis();
    builder
}

/// Installs the `env_logger` backend, `RUST_LOG` overriding the default
/// filter. Later calls are no-ops.
pub fn init() {
    let _ = builder(FILTER_ENV).try_init();
}
