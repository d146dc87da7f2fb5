//! scicalc: scientific calculator driven by keypad labels
//!
//! ## Usage
//!
//! ```bash
//! scicalc                              # read labels from stdin
//! scicalc --keys "2 × ( 3 + 4 ) ="     # press once and print
//! scicalc --config calc.json -p 4      # custom precision
//! ```

use clap::Parser;
use scicalc_cli::{logging, Cli, CliResult, Session};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = Session::config_from_cli(&cli)?;
    tracing::debug!(?config, "starting session");
    let mut session = Session::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr().lock();

    match &cli.keys {
        Some(keys) => {
            if let scicalc_cli::LineOutcome::Pressed { unknown } = session.feed_line(keys) {
                for label in unknown {
                    writeln!(err, "unknown button: {label}")?;
                }
            }
            writeln!(out, "{}", session.display_line())?;
        }
        None => session.run(io::stdin().lock(), &mut out, &mut err)?,
    }

    if cli.history {
        session.write_history(&mut out)?;
    }
    out.flush()?;
    Ok(())
}
