//! CLI command definitions and handlers.

pub mod analyze;
pub mod verify;

use clap::{Parser, Subcommand};

/// Veriface - Deepfake verdicts with tamper-evident records
#[derive(Parser)]
#[command(name = "veriface")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze extracted faces and seal the verdict into a record
    Analyze(analyze::AnalyzeArgs),
    /// Re-derive the verification hash of a stored record
    Verify(verify::VerifyArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Authentic verdict, or record verified.
    Success = 0,
    /// Deepfake verdict, or record not verified.
    Flagged = 1,
    /// Invalid input or runtime failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
