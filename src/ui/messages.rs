use crate::core::tracking::Notices;
use crate::models::session::TrackingStatus;
use ansi_term::Colour;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Optional: formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}{}====================== {}\n{}",
        FG_BLUE, BOLD, msg, RESET
    );
}

/// Colored status badge for the tracking screen.
pub fn status_badge(status: TrackingStatus) -> String {
    let label = match status {
        TrackingStatus::Idle => "IDLE",
        TrackingStatus::Active => "● TRACKING ACTIVE",
        TrackingStatus::Paused => "‖ PAUSED",
        TrackingStatus::Stopped => "■ STOPPED",
    };
    let colour = match status {
        TrackingStatus::Idle => Colour::White,
        TrackingStatus::Active => Colour::Green,
        TrackingStatus::Paused => Colour::Yellow,
        TrackingStatus::Stopped => Colour::Red,
    };
    colour.bold().paint(label).to_string()
}

/// Terminal implementation of the session manager's notice channel.
/// Stands in for the toast layer of the mobile shell.
pub struct TerminalNotices;

impl Notices for TerminalNotices {
    fn info(&self, message: &str) {
        info(message);
    }

    fn success(&self, message: &str) {
        success(message);
    }

    fn warning(&self, message: &str) {
        warning(message);
    }

    fn error(&self, message: &str) {
        error(message);
    }
}
