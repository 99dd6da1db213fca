//! Display module for formatted CLI output

pub mod table;

pub use table::TableRenderer;

use crate::infrastructure::powershell::OutputSink;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

/// Terminal sink for live script output.
///
/// Progress lines are prefixed with an hourglass while a script runs;
/// stderr lines show up in yellow so they stand out without interrupting
/// the stream.
pub struct TerminalSink {
    show_progress: bool,
}

impl TerminalSink {
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OutputSink for TerminalSink {
    fn write_std_out(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        if self.show_progress {
            println!("⏳ {line}");
        } else {
            println!("{line}");
        }
    }

    fn write_std_err(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        println!("⏳ {}", line.yellow());
    }

    fn flush(&mut self) {
        let _ = std::io::stdout().flush();
    }
}

/// Success banner printed after long-running commands.
pub fn print_completed(command: &str, duration: Duration) {
    println!("{} '{}' completed in {:?}", "✔".green(), command, duration);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message.yellow());
}

pub fn print_failure(message: &str) {
    eprintln!("{} {}", "✖".red(), message.red());
}
