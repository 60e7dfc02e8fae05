//! `astar`: shortest paths on walled grids.
//!
//! ```sh
//! astar --width 5 --height 4 --start 1,1 --end 5,4 --walls "2,1 2,2 2,3" -d
//! astar --interactive
//! astar --random --seed 7 --format json
//! ```

use std::io;
use std::process::ExitCode;

use astar_cli::{Args, run};
use clap::Parser;
use env_logger::Env;

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_filter())).init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    match run(&args, &mut input, &mut out) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}
