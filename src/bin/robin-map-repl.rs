//! Interactive driver: `robin-map-repl [CAPACITY]`, commands on stdin.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=robin_map=debug`) to see growth events on
//! stderr.

use robin_map::{protocol, RobinMap};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut map = match std::env::args().nth(1) {
        None => RobinMap::new(),
        Some(arg) => match arg.parse::<usize>() {
            Ok(capacity) => match RobinMap::with_capacity(capacity) {
                Ok(map) => map,
                Err(e) => {
                    eprintln!("robin-map-repl: {e}");
                    return ExitCode::FAILURE;
                }
            },
            Err(_) => {
                eprintln!("robin-map-repl: CAPACITY must be a positive integer, got {arg:?}");
                return ExitCode::FAILURE;
            }
        },
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match protocol::run(&mut map, stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "i/o failure");
            ExitCode::FAILURE
        }
    }
}
