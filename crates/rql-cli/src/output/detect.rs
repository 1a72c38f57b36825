//! TTY detection for format resolution.
//!
//! `auto` format picks colorized output for interactive terminals and
//! newline-delimited JSON for pipes; the decision is made once, at
//! strategy-selection time.

use is_terminal::IsTerminal;

/// Detect whether stdout is connected to an interactive terminal.
///
/// Returns `true` if stdout is a TTY, `false` if output is being piped or
/// redirected.
#[must_use]
pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal()
}

/// Check if colors should be enabled based on terminal and environment.
///
/// Colors are enabled when stdout is a TTY, `NO_COLOR` is not set, and
/// `TERM` is not "dumb". This follows the [NO_COLOR](https://no-color.org/)
/// standard.
#[must_use]
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }

    is_interactive()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variable tests are omitted: set_var/remove_var are unsafe
    // in edition 2024 and the values depend on the test environment anyway.

    #[test]
    fn is_interactive_returns_bool() {
        let _ = is_interactive();
    }

    #[test]
    fn should_use_colors_runs() {
        let _ = should_use_colors();
    }
}
