//! Command execution handlers

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::CliConfig;
use crate::del::{run_del, DelOutcome};
use crate::format::{format_success, OutputFormat, Printer};
use crate::store::{KvStore, RequestContext};

use super::commands::*;

/// Handle del command
pub async fn handle_del<S: KvStore + ?Sized>(
    store: &S,
    ctx: &RequestContext,
    args: DelArgs,
    format: OutputFormat,
) -> Result<()> {
    let flags = args.flags();
    let mut printer = Printer::new(format);

    // Keep KvError as the root cause so main can pick the exit code
    let outcome = run_del(store, ctx, &args.args, &flags, &mut printer).await?;

    if let DelOutcome::Scanned(outcomes) = outcome {
        tracing::debug!("key-contains run handled {} key(s)", outcomes.len());
    }

    Ok(())
}

/// Handle config commands
pub async fn handle_config(
    command: ConfigCommands,
    current_config: &CliConfig,
    config_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(current_config)?);
            }
            OutputFormat::Simple | OutputFormat::Table => {
                println!("CLI Configuration:");
                println!("{:<20} Value", "Setting");
                println!("{}", "-".repeat(40));
                println!("{:<20} {}", "Endpoint", current_config.endpoint);
                println!("{:<20} {}", "Output Format", current_config.output_format);
                println!("{:<20} {}", "Verbose", current_config.verbose);
                println!("{:<20} {}s", "Timeout", current_config.timeout);
                println!("{:<20} {}", "Config File", config_path.display());
            }
        },
        ConfigCommands::Set { key, value } => {
            let mut config = CliConfig::load(config_path)?;
            config
                .set(&key, &value)
                .with_context(|| format!("Cannot set {}", key))?;
            config.save(config_path)?;
            println!("{}", format_success(&format!("Set {} = {}", key, value)));
        }
        ConfigCommands::Reset => {
            CliConfig::default().save(config_path)?;
            println!("{}", format_success("Configuration reset to defaults"));
        }
    }

    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
