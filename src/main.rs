//! Zoomfolder — zoomable icicle view of disk usage.
//!
//! Thin binary entry point. All logic lives in the `zoomfolder-core`
//! and `zoomfolder-gui` crates.
//!
//! Usage:
//!   zoomfolder [PATH] [--width <PX>] [--height <PX>] [--verbose]

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use zoomfolder_gui::app::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use zoomfolder_gui::{ViewerOptions, ZoomfolderApp, ZoomfolderState};

#[derive(Parser)]
#[command(
    name = "zoomfolder",
    version,
    about = "A zoomable disk usage viewer",
    long_about = "Zoomfolder scans a folder in the background and draws it as an \
                  icicle chart that grows while the scan runs.\n\n\
                  Scroll to zoom at the pointer, drag to pan, R resets the view \
                  and Esc stops the scan."
)]
struct Cli {
    /// Folder to scan on startup
    path: Option<PathBuf>,

    /// Initial window width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: f32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: f32,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for ViewerOptions {
    fn from(cli: Cli) -> Self {
        Self {
            initial_path: cli.path,
            width: cli.width,
            height: cli.height,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging.
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    tracing::info!("Zoomfolder starting");

    let options = ViewerOptions::from(cli);
    let mut native = options.native_options();
    native.viewport = native
        .viewport
        .with_icon(zoomfolder_gui::icon::generate_icon(64));

    // Start the initial scan before the window exists so the first frame
    // already has a tree to draw.
    let state = ZoomfolderState::build(&options);

    eframe::run_native(
        "Zoomfolder",
        native,
        Box::new(|cc| Ok(Box::new(ZoomfolderApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
