#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Environment variables with the `FOLIO_` prefix provide defaults that
//! explicit flags override.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
folio — terminal portfolio

USAGE:
    folio [OPTIONS]

OPTIONS:
    --screen=NAME        Start on a screen: home | about | portfolio | contact
    --state-file=PATH    Profile store location (default: XDG state dir)
    --reset              Clear the profile store before starting
    --offline            Skip the location lookup
    --no-mouse           Disable mouse event capture
    --exit-after-ms=N    Auto-quit after N milliseconds (for harness runs)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    1-4             Switch screens
    Tab / Shift-Tab Cycle screens
    j/k, arrows     Move selection
    Enter           Open the selected project
    Esc             Close the project overlay
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    FOLIO_STATE_FILE     Override --state-file
    FOLIO_OFFLINE        Set to 1 to imply --offline
    FOLIO_EXIT_AFTER_MS  Override --exit-after-ms
    FOLIO_LOG            tracing filter; enables file logging when set";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    pub screen: String,
    pub state_file: Option<PathBuf>,
    pub reset: bool,
    pub offline: bool,
    pub mouse: bool,
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            screen: "home".into(),
            state_file: None,
            reset: false,
            offline: false,
            mouse: true,
            exit_after_ms: 0,
        }
    }
}

impl Opts {
    /// Parse process arguments and environment overrides.
    #[must_use]
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(val) = env::var("FOLIO_STATE_FILE") {
            opts.state_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = env::var("FOLIO_OFFLINE") {
            opts.offline = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Ok(val) = env::var("FOLIO_EXIT_AFTER_MS")
            && let Ok(ms) = val.parse()
        {
            opts.exit_after_ms = ms;
        }

        for arg in env::args().skip(1) {
            opts.apply(&arg);
        }
        opts
    }

    fn apply(&mut self, arg: &str) {
        match arg {
            "--help" | "-h" => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            "--version" | "-V" => {
                println!("folio {VERSION}");
                process::exit(0);
            }
            "--reset" => self.reset = true,
            "--offline" => self.offline = true,
            "--no-mouse" => self.mouse = false,
            _ => {
                if let Some(val) = arg.strip_prefix("--screen=") {
                    self.screen = val.to_string();
                } else if let Some(val) = arg.strip_prefix("--state-file=") {
                    self.state_file = Some(PathBuf::from(val));
                } else if let Some(val) = arg.strip_prefix("--exit-after-ms=") {
                    match val.parse() {
                        Ok(ms) => self.exit_after_ms = ms,
                        Err(_) => die(&format!("invalid --exit-after-ms value: {val}")),
                    }
                } else {
                    die(&format!("unknown argument: {arg}"));
                }
            }
        }
    }
}

fn die(msg: &str) -> ! {
    eprintln!("error: {msg}\n\n{HELP_TEXT}");
    process::exit(2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Opts::default();
        assert_eq!(opts.screen, "home");
        assert!(opts.mouse);
        assert!(!opts.reset);
        assert!(!opts.offline);
        assert_eq!(opts.exit_after_ms, 0);
    }

    #[test]
    fn flags_apply() {
        let mut opts = Opts::default();
        opts.apply("--reset");
        opts.apply("--offline");
        opts.apply("--no-mouse");
        opts.apply("--screen=portfolio");
        opts.apply("--state-file=/tmp/s.json");
        opts.apply("--exit-after-ms=250");
        assert!(opts.reset);
        assert!(opts.offline);
        assert!(!opts.mouse);
        assert_eq!(opts.screen, "portfolio");
        assert_eq!(opts.state_file.as_deref(), Some(std::path::Path::new("/tmp/s.json")));
        assert_eq!(opts.exit_after_ms, 250);
    }
}
