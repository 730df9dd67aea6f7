//! Command-line argument parsing
//!
//! Supports:
//! - Highlighting a local file to markup
//! - Listing the remote file tree
//! - Running a remote file
//! - Deploying and calling contracts

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Contract-development editor core
#[derive(Parser, Debug)]
#[command(name = "axide", version, about = "Contract-development editor core")]
pub struct CliArgs {
    /// Backend base URL (overrides config file and AXIDE_BACKEND_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print the highlight markup of a local source file
    Highlight {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the remote file tree
    Tree,

    /// Run a remote file and print its output
    Run {
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Deploy a remote source file as a contract
    Deploy {
        #[arg(value_name = "PATH")]
        path: String,
        /// Constructor arguments as a JSON array
        #[arg(long, default_value = "[]")]
        args: String,
        /// Miner to submit through (defaults to the first listed)
        #[arg(long)]
        miner: Option<String>,
        /// Deployer account address
        #[arg(long, value_name = "ADDRESS")]
        address: Option<String>,
    },

    /// Call a method on a deployed contract
    Call {
        #[arg(value_name = "CONTRACT")]
        contract: String,
        #[arg(value_name = "METHOD")]
        method: String,
        /// Method arguments as a JSON array
        #[arg(long, default_value = "[]")]
        args: String,
        #[arg(long)]
        miner: Option<String>,
        /// Caller account address
        #[arg(long, value_name = "ADDRESS")]
        address: Option<String>,
    },
}
