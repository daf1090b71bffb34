use std::{env, process};

use csivk::{app, config::AppConfig, logging};

fn try_main() -> anyhow::Result<()> {
    logging::init();

    let config = AppConfig::from_args(env::args().skip(1))?;
    app::run(config)
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{e:#}");
        process::exit(1);
    }
}
