//! kvstore CLI
//!
//! Command-line client that deletes keys from a kvstore cluster.

use anyhow::Result;
use clap::Parser;
use kvstore_core::{KvError, EXIT_ERROR};
use kvstorectl::cli::{generate_completion, handle_config, handle_del, Cli, Commands, DelArgs};
use kvstorectl::client::KvClient;
use kvstorectl::config::CliConfig;
use kvstorectl::format::OutputFormat;
use kvstorectl::store::RequestContext;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Build configuration using priority chain: defaults → file → env → CLI args
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    init_tracing(config.verbose);
    debug!(
        endpoint = %config.endpoint,
        format = %config.output_format,
        timeout = config.timeout,
        "Configuration resolved"
    );

    let format = OutputFormat::from_name(&config.output_format);

    let result = match cli.command {
        Commands::Del(args) => run_del_command(&config, args, format).await,
        Commands::Config { command } => match config_path(cli.config) {
            Ok(path) => handle_config(command, &config, &path, format).await,
            Err(e) => Err(e),
        },
        Commands::Completion { shell } => {
            generate_completion(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if config.verbose {
            eprintln!("Error details: {:?}", e);
        }
        let code = e
            .downcast_ref::<KvError>()
            .map(KvError::exit_code)
            .unwrap_or(EXIT_ERROR);
        std::process::exit(code);
    }
}

fn build_config(cli: &Cli) -> Result<CliConfig, KvError> {
    let mut builder = CliConfig::builder();

    // Load config file (unless --no-config is specified)
    if !cli.no_config {
        let path = cli
            .config
            .clone()
            .or_else(|| CliConfig::default_path().ok());
        builder = builder.with_config_file(path.as_deref());
    }

    builder = builder.with_env_overrides();

    // CLI arguments have the highest priority
    if let Some(ref endpoint) = cli.endpoint {
        builder = builder.with_endpoint(endpoint)?;
    }
    if let Some(ref format) = cli.format {
        builder = builder.with_output_format(OutputFormat::from(format).as_str())?;
    }
    if let Some(timeout) = cli.timeout {
        builder = builder.with_timeout(timeout)?;
    }
    if let Some(verbose) = cli.verbose {
        builder = builder.with_verbose(verbose);
    }

    builder.build()
}

fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => CliConfig::default_path(),
    }
}

/// Run `del` under one request context; Ctrl-C cancels the in-flight call.
async fn run_del_command(config: &CliConfig, args: DelArgs, format: OutputFormat) -> Result<()> {
    let client = KvClient::new(&config.endpoint, config.timeout)?;
    let (ctx, cancel) = RequestContext::with_timeout(Duration::from_secs(config.timeout));
    debug!(endpoint = client.base_url(), "Running del");

    let command = handle_del(&client, &ctx, args, format);
    tokio::pin!(command);

    tokio::select! {
        result = &mut command => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            debug!("Interrupted, cancelling request");
            cancel.cancel();
            command.await
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
