//! Shared CLI output formatting: envelopes on stdout, diagnostics on stderr.

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    // Default: enable color if stderr is a terminal
    atty_stderr()
}

/// Check if stderr is a TTY.
fn atty_stderr() -> bool {
    unsafe { libc_isatty(2) != 0 }
}

#[cfg(unix)]
extern "C" {
    fn isatty(fd: std::os::raw::c_int) -> std::os::raw::c_int;
}

#[cfg(unix)]
unsafe fn libc_isatty(fd: i32) -> i32 {
    unsafe { isatty(fd) }
}

#[cfg(not(unix))]
unsafe fn libc_isatty(_fd: i32) -> i32 {
    0
}

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    pub fn green(&self, s: &str) -> String {
        if self.use_color {
            format!("{GREEN}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn red(&self, s: &str) -> String {
        if self.use_color {
            format!("{RED}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn dim(&self, s: &str) -> String {
        if self.use_color {
            format!("{DIM}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn bold(&self, s: &str) -> String {
        if self.use_color {
            format!("{BOLD}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a branded header for diagnostic output.
pub fn print_header(s: &Styled) {
    eprintln!(
        "  {} {}",
        s.bold("mandi"),
        s.dim(&format!("v{}", env!("CARGO_PKG_VERSION")))
    );
    eprintln!();
}

/// Print a section header (e.g., "System", "Browser").
pub fn print_section(s: &Styled, title: &str) {
    eprintln!("  {}", s.bold(title));
}

/// Print a check result line with symbol and label/value.
pub fn print_check(symbol: &str, label: &str, value: &str) {
    eprintln!("    {symbol} {label:<16} {value}");
}

/// Print an indented detail/fix line under a check.
pub fn print_detail(msg: &str) {
    eprintln!("                        {msg}");
}

/// Print a status summary line at the bottom.
pub fn print_status(s: &Styled, status: &str, msg: &str) {
    eprintln!();
    eprintln!("  {}: {status} ({msg})", s.bold("Status"));
}

/// Print a single-line JSON value to stdout.
///
/// Envelopes stay on one line so downstream consumers can treat stdout
/// as exactly one JSON document per invocation.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string(value) {
        println!("{s}");
    }
}
