mod format;

use crate::kind::{DeclaredType, ScalarKind};
use clap::{Parser, Subcommand};
pub use format::{ColorMode, OutputFormat};
use std::path::PathBuf;

/// Inspect grid filter registrations and try the value parser
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML file with registrations applied on top of the built-in ones
    #[arg(short, long, global = true, env = "GRID_FILTERS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered (type, method, filter) entries
    List {
        /// Only show registrations for this type (e.g. "i32", "datetime?")
        #[arg(short = 't', long = "type")]
        declared: Option<DeclaredType>,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Parse raw values as the given kind
    Parse {
        /// Value kind (e.g. "i32", "decimal", "datetime")
        #[arg(short, long)]
        kind: ScalarKind,

        /// Raw values; an empty string is the null sentinel
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show which filter handles a type and method
    Resolve {
        #[arg(short = 't', long = "type")]
        declared: DeclaredType,

        #[arg(short, long)]
        method: String,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
