use clap::Parser;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Remote control panel for a running demo engine
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Port for the engine bridge HTTP server
    #[arg(short = 'p', long = "port", value_name = "PORT", default_value_t = 9002)]
    pub port: u16,

    /// Snap grid for timeline edits, milliseconds
    #[arg(long = "snap-grid", value_name = "MS", default_value_t = 50.0)]
    pub snap_grid_ms: f64,

    /// Disable snapping of timeline edits
    #[arg(long = "no-snap")]
    pub no_snap: bool,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
