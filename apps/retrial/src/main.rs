//! retrial - dependency checksum verification
//!
//! This is the main CLI application; it loads configuration, wires the
//! operations context and renders events and results.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::{CliError, EXIT_SUCCESS};
use crate::events::EventHandler;
use clap::Parser;
use retrial_config::{Config, SourceKind};
use retrial_errors::{Error, VerifyError};
use retrial_events::EventReceiver;
use retrial_ops::{MismatchReport, OperationResult, OpsContextBuilder, OpsCtx};
use retrial_types::{ColorChoice, OutputFormat};
use std::path::Path;
use std::process;
use tokio::select;
use tracing::{error, info};

/// Default filter for debug log files
const DEBUG_LOG_FILTER: &str = "info,retrial=debug,retrial_guard=debug,retrial_ops=debug";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration decides the log directory and output format, so it is
    // loaded before tracing is installed.
    let config = match load_config(&cli.global).await {
        Ok(config) => config,
        Err(e) => {
            if !cli.global.json {
                eprintln!("Error: {e}");
            }
            process::exit(e.exit_code());
        }
    };

    let format = output_format(&cli.global, &config);
    init_tracing(
        format == OutputFormat::Json,
        cli.global.debug,
        &config.log_dir(),
    );

    match run(cli, config, format).await {
        Ok(()) => process::exit(EXIT_SUCCESS),
        Err(e) => {
            error!(error = %e, "run failed");
            if format != OutputFormat::Json {
                eprintln!("Error: {e}");
            }
            process::exit(e.exit_code());
        }
    }
}

/// Build the context, run the command, render its outcome
async fn run(cli: Cli, config: Config, format: OutputFormat) -> Result<(), CliError> {
    info!("Starting retrial v{}", env!("CARGO_PKG_VERSION"));

    let (event_sender, event_receiver) = retrial_events::channel();
    let ctx = OpsContextBuilder::new()
        .with_config(config.clone())
        .with_event_sender(event_sender)
        .build()?;
    let run_id = ctx.run_id;

    let renderer = OutputRenderer::new(format, config.general.color);

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(
        colors_enabled && format == OutputFormat::Tty,
        cli.global.debug,
        format == OutputFormat::Json,
    );

    let result =
        execute_command_with_events(cli.command, ctx, event_receiver, &mut event_handler).await;

    match result {
        Ok(result) => {
            renderer.render_result(&result)?;
            info!(run_id = %run_id, "command finished");
            Ok(())
        }
        Err(CliError::Ops(Error::Verify(VerifyError::DependenciesChanged { diff }))) => {
            let mismatch = OperationResult::DependenciesChanged(MismatchReport {
                run_id,
                diff: (*diff).clone(),
            });
            renderer.render_result(&mismatch)?;
            Err(CliError::Ops(VerifyError::DependenciesChanged { diff }.into()))
        }
        Err(e) => Err(e),
    }
}

/// Run the command while draining its events to the handler
async fn execute_command_with_events(
    command: Commands,
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let mut command_future = Box::pin(execute_command(command, ops_ctx));

    loop {
        select! {
            result = &mut command_future => {
                // Events sent just before completion are still queued.
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            Some(event) = event_receiver.recv() => event_handler.handle_event(event),
        }
    }
}

/// Dispatch to the matching operation
async fn execute_command(command: Commands, ctx: OpsCtx) -> Result<OperationResult, CliError> {
    match command {
        Commands::Verify => {
            let report = retrial_ops::verify(&ctx).await?;
            Ok(OperationResult::Verified(report))
        }
        Commands::Record => {
            let report = retrial_ops::record(&ctx).await?;
            Ok(OperationResult::Recorded(report))
        }
    }
}

/// Load configuration with precedence: file, then environment, then flags
async fn load_config(global: &GlobalArgs) -> Result<Config, CliError> {
    let mut config = Config::load_or_default(global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, global);
    config.validate()?;
    Ok(config)
}

/// Flags override file and environment settings
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if let Some(path) = &global.checksum_file {
        config.paths.checksum_file = Some(path.clone());
    }
    if let Some(path) = &global.manifest {
        config.source.kind = SourceKind::Manifest;
        config.source.manifest = Some(path.clone());
    }
    if let Some(path) = &global.repository {
        config.source.kind = SourceKind::Repository;
        config.source.repository = Some(path.clone());
    }
    if let Some(jobs) = global.jobs {
        config.verify.max_concurrency = jobs;
    }
}

fn output_format(global: &GlobalArgs, config: &Config) -> OutputFormat {
    if global.json {
        OutputFormat::Json
    } else {
        config.general.default_output
    }
}

/// Install the global subscriber: a JSON log file under `--debug`
/// or `RUST_LOG`, silence in JSON mode, `warn` on stderr otherwise
fn init_tracing(json_mode: bool, debug_enabled_flag: bool, log_dir: &Path) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            if !json_mode {
                eprintln!("warning: cannot create {}: {e}", log_dir.display());
            }
        }

        let log_file = log_dir.join(format!(
            "retrial-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new(DEBUG_LOG_FILTER),
                        ),
                    )
                    .init();

                if !json_mode {
                    eprintln!("debug log: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("warning: cannot create {}: {e}", log_file.display());
                }
            }
        }
    }

    if json_mode {
        // stdout carries exactly one JSON document.
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}
