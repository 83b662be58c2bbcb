//! Herald - status lines and diagnostics for the pinboard tools
//!
//! Two channels:
//!
//! - Status lines (`success()`, `info()`, `warn()`, `error()`) are what a
//!   person sees after an action: "Note saved", "Invalid JSON file".
//!   They go to stderr with a colored tag, one tag per line.
//! - Diagnostics go through `tracing`. Call `init_tracing()` once from a
//!   binary; libraries only use the `tracing` macros.

use colored::*;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity-derived log filter
pub const LOG_ENV: &str = "PINBOARD_LOG";

/// Kind of a user-facing status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Success,
  Info,
  Warn,
  Error,
}

impl Status {
  fn tag(self) -> &'static str {
    match self {
      Status::Success => "ok",
      Status::Info => "info",
      Status::Warn => "warn",
      Status::Error => "error",
    }
  }

  fn color(self) -> Color {
    match self {
      Status::Success => Color::Green,
      Status::Info => Color::Blue,
      Status::Warn => Color::Yellow,
      Status::Error => Color::Red,
    }
  }
}

/// Write raw lines to stderr
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

/// Build the padded `[tag]` prefix for a status kind
pub fn format_prefix(status: Status) -> String {
  let tag = status.tag();
  let pad = 7usize.saturating_sub(tag.len() + 2);
  format!("[{}]{:<pad$}", tag.color(status.color()).bold(), "")
}

/// Render a status message, prefixing every line
pub fn render(status: Status, message: &str) -> Vec<String> {
  let prefix = format_prefix(status);
  message.lines().map(|line| format!("{prefix} {line}")).collect()
}

/// Emit a status message of the given kind
pub fn status(status: Status, message: &str) {
  for line in render(status, message) {
    log(&line);
  }
}

/// Something completed
pub fn success(message: &str) {
  status(Status::Success, message);
}

/// Neutral information
pub fn info(message: &str) {
  status(Status::Info, message);
}

/// Something needs attention but the action went through
pub fn warn(message: &str) {
  status(Status::Warn, message);
}

/// The action failed
pub fn error(message: &str) {
  status(Status::Error, message);
}

/// Filter directive for a `-v` count
pub fn verbosity_directive(verbosity: u8) -> &'static str {
  match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Install the global fmt subscriber. `PINBOARD_LOG` wins over `verbosity`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbosity: u8) {
  let filter = EnvFilter::try_from_env(LOG_ENV)
    .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity)));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}
