use clap::{Parser, Subcommand};

/// Command-line interface definition for shifttrack
/// CLI client to check in for work shifts and track location-logged days
#[derive(Parser)]
#[command(
    name = "shifttrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check in for work shifts and run location-tracked attendance sessions",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (useful for tests or custom setups)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Run in test mode (non-interactive; never spawns an editor)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Sign in to the demo account with a one-time passcode
    Login {
        /// Phone number of the account (defaults to the configured worker)
        #[arg(long)]
        phone: Option<String>,

        /// The 6-digit one-time passcode
        #[arg(long)]
        otp: String,
    },

    /// Face-verification check-in: fix location, verify, record attendance
    Checkin {
        /// Skip the selfie step and record a manual check-in
        #[arg(long = "skip-verification")]
        skip_verification: bool,
    },

    /// Run a location-tracked work session in the foreground
    Track {
        /// End the day automatically after this many seconds (demo runs);
        /// without it the session runs until the hour ceiling stops it
        #[arg(long = "for-secs", value_name = "SECS")]
        for_secs: Option<u64>,

        /// Override the capture cadence, in seconds
        #[arg(long = "interval-secs", value_name = "SECS")]
        interval_secs: Option<u64>,

        /// Override the elapsed-time refresh cadence, in seconds
        #[arg(long = "refresh-secs", value_name = "SECS")]
        refresh_secs: Option<u64>,

        /// Override the auto-stop ceiling, in hours
        #[arg(long = "max-hours", value_name = "HOURS")]
        max_hours: Option<f64>,

        /// Demo: pause tracking after this many seconds
        #[arg(long = "pause-after-secs", value_name = "SECS")]
        pause_after_secs: Option<u64>,

        /// Demo: resume tracking this many seconds after the pause
        #[arg(
            long = "resume-after-secs",
            value_name = "SECS",
            requires = "pause_after_secs"
        )]
        resume_after_secs: Option<u64>,

        /// Print the internal operations log after the session ends
        #[arg(long)]
        verbose: bool,

        /// Save the captured updates to this file when the session ends
        #[arg(long = "save-updates", value_name = "FILE")]
        save_updates: Option<String>,

        /// Format for --save-updates: csv, json
        #[arg(long, value_name = "FORMAT", default_value = "csv")]
        format: String,
    },

    /// Show attendance history
    History {
        /// Filter by period.
        ///
        /// Supported formats:
        /// - YYYY                  → entire year (e.g. "2025")
        /// - YYYY-MM               → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD            → specific day (e.g. "2025-06-18")
        /// - ranges `start:end` in the same formats
        /// - `all`                 → the whole archive
        ///
        /// If omitted, the default is the current month.
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, or ranges)"
        )]
        period: Option<String>,
    },

    /// Export attendance history in various formats
    Export {
        /// Export format: csv, json
        #[arg(long, value_name = "FORMAT", default_value = "csv")]
        format: String,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}
