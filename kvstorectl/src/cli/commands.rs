//! CLI command and subcommand definitions

use clap::{Args, Parser, Subcommand};
use kvstore_core::DeleteFlags;
use std::path::PathBuf;

/// kvstore CLI
#[derive(Parser, Debug)]
#[command(name = "kvstorectl")]
#[command(version, about = "Command-line client for a kvstore cluster", long_about = None)]
pub struct Cli {
    /// Gateway endpoint URL (overrides config file)
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Command timeout in seconds (overrides config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long, global = true)]
    pub verbose: Option<bool>,

    /// Don't load config file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Config file path (default: <config dir>/kvstore/cli.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Simple,
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Simple => crate::format::OutputFormat::Simple,
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Removes the specified key or range of keys [key, range_end)
    #[command(override_usage = "kvstorectl del [OPTIONS] <key> [range_end]")]
    Del(DelArgs),

    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments of the `del` command
#[derive(Args, Debug, Clone, Default)]
pub struct DelArgs {
    /// Key and optional exclusive range end
    ///
    /// The count is checked when the request is resolved, so that a wrong
    /// count is reported like every other argument error.
    #[arg(value_name = "KEY", num_args = 0..)]
    pub args: Vec<String>,

    /// Delete keys with matching prefix
    #[arg(long)]
    pub prefix: bool,

    /// Return deleted key-value pairs
    #[arg(long)]
    pub prev_kv: bool,

    /// Delete keys that are greater than or equal to the given key using byte compare
    #[arg(long)]
    pub from_key: bool,

    /// Delete keys that contain the matching string
    #[arg(long, value_name = "STRING")]
    pub key_contains: Option<String>,

    /// Actually delete the keys found by --key-contains (otherwise only print them)
    #[arg(long)]
    pub execute: bool,
}

impl DelArgs {
    /// Immutable flag set for the delete workflow
    pub fn flags(&self) -> DeleteFlags {
        DeleteFlags {
            prefix: self.prefix,
            prev_kv: self.prev_kv,
            from_key: self.from_key,
            key_contains: self.key_contains.clone().unwrap_or_default(),
            execute: self.execute,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set configuration value
    Set {
        /// Configuration key (endpoint, output_format, verbose, timeout)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}
