//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// scicalc: scientific calculator driven by keypad labels
///
/// Reads whitespace-separated button labels (`7 × ( 2 + 3 ) =`) from stdin,
/// one line at a time, and prints `history | current` after each line.
#[derive(Parser, Debug)]
#[command(name = "scicalc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Press these labels and print the final display instead of reading stdin
    #[arg(short, long, value_name = "LABELS")]
    pub keys: Option<String>,

    /// JSON engine configuration file
    #[arg(short, long, value_name = "FILE", env = "SCICALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Significant digits kept in results (1-17), overrides the config file
    #[arg(short, long, value_name = "N")]
    pub precision: Option<usize>,

    /// Print the history tape before exiting
    #[arg(long)]
    pub history: bool,

    /// Verbosity level (-v, -vv, -vvv); `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
