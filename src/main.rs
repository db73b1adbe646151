use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use resume_desk::constants::POLL_INTERVAL_MS;
use resume_desk::drivers::OutputDriver;
use resume_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use resume_desk::layout::Viewport;
use resume_desk::runner::run_desktop;
use resume_desk::{Desktop, DesktopError, tracing_sub};

const SAMPLE_DOCUMENT: &str = include_str!("../assets/resume.yaml");

#[derive(Debug, Parser)]
#[command(version, about = "Browse a resume as a desktop in the terminal")]
struct Cli {
    /// Resume document to show. Defaults to the bundled sample.
    #[arg(long, value_name = "PATH")]
    document: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Start on the desktop instead of the login screen.
    #[arg(long)]
    skip_login: bool,

    /// Start with terminal mouse capture turned off.
    #[arg(long)]
    no_mouse: bool,
}

fn main() -> Result<(), DesktopError> {
    let cli = Cli::parse();
    tracing_sub::init(
        cli.log_file.as_deref(),
        tracing_sub::level_for_verbosity(cli.verbose),
    )?;

    let document = match &cli.document {
        Some(path) => resume_markup::load_path(path)?,
        None => resume_markup::parse(SAMPLE_DOCUMENT),
    };

    let mut output = ConsoleOutputDriver::new()?;
    let (width, height) = output.size()?;
    let mut desktop = Desktop::new(document, Viewport::new(width, height));
    if let Some(path) = cli.document {
        desktop = desktop.with_document_path(path);
    }
    if cli.skip_login {
        desktop.skip_login();
    }
    desktop.set_mouse_capture_enabled(!cli.no_mouse);
    // The initial state is applied by the runner, not as a change.
    let _ = desktop.take_mouse_capture_change();

    output.enter()?;
    let result = run_desktop(
        &mut output,
        ConsoleInputDriver::new(),
        &mut desktop,
        Duration::from_millis(POLL_INTERVAL_MS),
    );
    output.exit()?;
    tracing::info!("desktop closed");
    result.map_err(|err| DesktopError::Terminal(err.to_string()))
}
