// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: errors go to stderr for the user.
// - exit: the exit status carries the verdict to the shell.
#![allow(clippy::print_stderr, clippy::exit)]

use std::io::Write;

use clap::Parser;
use fieldcheck_cli::{Cli, logging, run};

/// Exit status for usage and option errors.
const EXIT_USAGE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = match run(&cli, &mut out) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_USAGE
        }
    };
    if let Err(e) = out.flush() {
        eprintln!("Error: {e}");
    }
    std::process::exit(code);
}
