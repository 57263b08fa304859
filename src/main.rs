use anyhow::Result;
use clap::Parser;
use eframe::egui;
use log::{debug, info};

use demoscope::DemoscopeApp;
use demoscope::cli::Args;
use demoscope::remote::EngineBridge;

fn main() -> Result<()> {
    let args = Args::parse();

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
        .format_timestamp_millis()
        .init();

    info!("demoscope starting...");
    debug!("command-line args: {:?}", args);

    let link = EngineBridge::start(args.port);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("demoscope v{}", env!("CARGO_PKG_VERSION")))
            .with_resizable(true),
        persist_window: true,
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "demoscope",
        native_options,
        Box::new(move |cc| {
            let mut app = DemoscopeApp::new(cc, link);
            // CLI snapping flags win over persisted view state
            app.timeline_state.map.snap_grid_ms = args.snap_grid_ms;
            app.timeline_state.map.snap_enabled = !args.no_snap;
            Ok(Box::new(app))
        }),
    ) {
        anyhow::bail!("ui loop failed: {e}");
    }

    Ok(())
}
