use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "hipparcos-check",
    version,
    about = "Check a filtered Hipparcos catalogue export and reveal the secret word"
)]
pub struct Cli {
    /// CSV (or Parquet) file to check
    pub file: PathBuf,

    /// Encoded reward message (.pkl, .json or plain text)
    #[arg(long, env = "HIPPARCOS_SECRET", default_value = "data/secret-word.pkl")]
    pub secret: PathBuf,

    /// How outcomes map to the process exit code
    #[arg(
        long,
        value_enum,
        env = "HIPPARCOS_EXIT_CODES",
        default_value_t = ExitCodes::Lenient
    )]
    pub exit_codes: ExitCodes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExitCodes {
    /// Exit 0 whenever the run finishes, whatever it reported
    Lenient,
    /// Distinct non-zero codes for failed checks, input errors and aborts
    Strict,
}
