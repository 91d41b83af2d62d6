//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagkit")]
#[command(about = "Tag registry and permission expression evaluator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Registry file (default: $TAGKIT_REGISTRY, then ./tags.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a tag by name or code
    Exists {
        /// Tag name (case-insensitive) or code (exact)
        token: String,
    },

    /// Print the highest level in a tag list
    Lvl {
        /// Space-separated tag list
        tags: String,
    },

    /// Print the code string of a tag list
    Codes {
        /// Space-separated tag list
        tags: String,
    },

    /// Test a tag list against an expression (e.g. "wizard|admin staff+ !banned")
    Check {
        /// Space-separated active tags
        tags: String,

        /// Check expression
        expr: String,

        /// Print nothing; exit with status 1 when the check fails
        #[arg(short, long)]
        quiet: bool,
    },

    /// Apply grants and revokes (e.g. "character !staff") to a tag list
    Set {
        /// Space-separated current tags
        tags: String,

        /// Set expression
        expr: String,

        /// Current data bag as a JSON object
        #[arg(short, long, value_name = "JSON")]
        data: Option<String>,
    },

    /// List registered tags
    List,
}
