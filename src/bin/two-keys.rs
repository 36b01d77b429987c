//! Stores two keys in a default table and prints both lookups.

use robin_map::protocol::{self, Command};
use robin_map::RobinMap;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut map = RobinMap::new();
    let commands = [
        Command::Put("first".into(), 1),
        Command::Put("second".into(), 2),
        Command::Get("first".into()),
        Command::Get("second".into()),
    ];
    for cmd in commands {
        match protocol::execute(&mut map, cmd) {
            Ok(response) => println!("{response}"),
            Err(e) => {
                eprintln!("two-keys: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
