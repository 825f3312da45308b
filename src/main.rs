//! toolprobe CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use toolprobe::cli::{Cli, CommandDispatcher, Commands};
use toolprobe::ui::{create_ui, OutputMode};
use toolprobe::ToolprobeError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so `scan --json` output stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("toolprobe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("toolprobe=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn is_ci() -> bool {
    std::env::var_os("CI").is_some()
}

fn exit_code_for(err: &ToolprobeError) -> u8 {
    match err {
        ToolprobeError::ConfigNotFound { .. }
        | ToolprobeError::ConfigParseError { .. }
        | ToolprobeError::ConfigValidationError { .. } => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("toolprobe starting with args: {:?}", cli);

    let json_scan = matches!(&cli.command, Some(Commands::Scan(args)) if args.json);
    let output_mode = OutputMode::from_quiet(cli.quiet || json_scan);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let working_dir = std::env::current_dir().unwrap_or_default();
    let is_interactive = console::Term::stdout().is_term() && !is_ci();

    let mut ui = create_ui(is_interactive, output_mode);
    let dispatcher = CommandDispatcher::new(working_dir, cli.config.clone());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code.clamp(0, 255) as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(exit_code_for(&e))
        }
    }
}
