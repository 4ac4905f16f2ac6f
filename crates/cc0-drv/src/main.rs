//! §11: a `tracing-subscriber` `EnvFilter` subscriber defaulting to `warn`,
//! raised by `RUST_LOG`, installed once here — grounded on the sibling
//! `faxt` CLI's `init_logging`, minus the colored-output option this
//! language's fixed CLI grammar has no flag for.

use cc0_drv::{print_usage, run, Config};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::parse(&args) {
        Ok(config) => config,
        Err(_) => {
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(error) = run(&config) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
