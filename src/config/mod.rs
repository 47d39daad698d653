pub mod course;

pub use course::CourseConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "group-assign")]
#[command(about = "Registers course participants and partitions them into balanced random groups")]
pub struct CliConfig {
    /// Directory holding the roster data file
    #[arg(long, default_value = ".")]
    pub data_dir: String,

    /// Optional course configuration file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Register a participant (unassigned until the next assignment round)
    Register {
        /// Full display name
        name: String,
        /// Registration code (fixed prefix + numeric suffix)
        code: String,
    },
    /// Look up a participant's group assignment
    Check { code: String },
    /// Run one assignment round over everyone currently unassigned
    Assign {
        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Clear every group assignment (participants stay registered)
    Clear,
    /// Show roster totals
    Status,
    /// Print the grouped roster
    Report,
    /// Write the full roster as CSV to stdout
    ExportCsv,
    /// Replace the whole roster from a JSON backup file
    Restore {
        /// Path to a JSON array of participants
        file: String,
        /// Confirm the destructive replace
        #[arg(long)]
        yes: bool,
    },
}
