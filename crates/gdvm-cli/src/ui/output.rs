//! The terminal [`Reporter`].
//!
//! Lifecycle messages go to stdout, warnings and errors to stderr. Download
//! progress is redrawn in place on stderr and suppressed in quiet mode.

use super::theme::{Theme, format_size};
use crossterm::QueueableCommand;
use crossterm::cursor::MoveToColumn;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use gdvm_core::Reporter;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Reporter writing styled lines to the terminal.
#[derive(Debug)]
pub struct Output {
    theme: Theme,
    quiet: bool,
    progress: Mutex<Option<Progress>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Progress {
    name: String,
    percent: Option<u64>,
}

impl Output {
    /// `quiet` hides download progress.
    pub fn new(quiet: bool) -> Self {
        Self {
            theme: Theme::default(),
            quiet,
            progress: Mutex::new(None),
        }
    }

    /// End an in-place progress line before printing anything else.
    fn finish_progress(&self) {
        let mut progress = self.progress.lock().unwrap_or_else(PoisonError::into_inner);
        if progress.take().is_some() {
            eprintln!();
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Reporter for Output {
    fn info(&self, msg: &str) {
        self.finish_progress();
        println!("  {} {}", self.theme.icons.info, msg);
    }

    fn success(&self, msg: &str) {
        self.finish_progress();
        println!(
            "  {} {}",
            self.theme.icons.success.with(self.theme.colors.success),
            msg
        );
    }

    fn warning(&self, msg: &str) {
        self.finish_progress();
        eprintln!(
            "  {} {}",
            self.theme.icons.warning.with(self.theme.colors.warning),
            msg
        );
    }

    fn error(&self, msg: &str) {
        self.finish_progress();
        eprintln!(
            "  {} {}",
            self.theme.icons.error.with(self.theme.colors.error),
            msg.with(self.theme.colors.error)
        );
    }

    fn downloading(&self, name: &str, current: u64, total: Option<u64>) {
        if self.quiet {
            return;
        }

        let percent = total.filter(|t| *t > 0).map(|t| current * 100 / t);
        let next = Progress {
            name: name.to_string(),
            percent,
        };
        let mut progress = self.progress.lock().unwrap_or_else(PoisonError::into_inner);
        // Redraw only when the visible percentage changes.
        if percent.is_some() && progress.as_ref() == Some(&next) {
            return;
        }

        let amount = match total {
            Some(total) => format!("{} / {}", format_size(current), format_size(total)),
            None => format_size(current),
        };
        let mut stderr = io::stderr();
        let _ = stderr.queue(MoveToColumn(0));
        let _ = stderr.queue(Clear(ClearType::CurrentLine));
        let _ = write!(
            stderr,
            "  {} {} {}",
            self.theme.icons.active.with(self.theme.colors.active),
            name,
            amount.with(self.theme.colors.secondary)
        );
        let _ = stderr.flush();
        *progress = Some(next);
    }
}
