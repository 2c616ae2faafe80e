// CIT - Capital Income Tax
// Written in 2024 by
//   The CIT developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Logging
//!
//! Log infrastructure. This uses the traits and macros from the log 0.4 crate.
//!
//! Writes WARN and more urgent messages to stderr (INFO too when verbose),
//! leaving stdout for the reports themselves. Optionally also logs everything
//! DEBUG and up to a debug log, with timestamp and severity information.
//!
//! Any errors related to writing are simply dropped and the messages won't be
//! logged. Errors related to initially opening the files should kill the program.
//!

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// The most verbose level shown on the terminal
fn terminal_level(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    }
}

/// Internal marker structure used to indicate that we only log to the terminal
struct TerminalOnly;

impl log::Log for TerminalOnly {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", record.args());
        }
    }

    fn flush(&self) {}
}

/// Actual logging structure
pub struct Logger {
    /// Most verbose level that is also shown on the terminal
    terminal_level: log::LevelFilter,
    /// Log for everything, with timestamps
    debug_log: Mutex<File>,
}

impl Logger {
    /// Initialize a global logger which also writes to a debug log
    pub fn init<P: AsRef<Path>>(debug_log: P, verbose: bool) -> Result<(), anyhow::Error> {
        log::set_max_level(log::LevelFilter::Debug);
        log::set_boxed_logger(Box::new(Logger {
            terminal_level: terminal_level(verbose),
            debug_log: Mutex::new(File::create(debug_log)?),
        }))
        .map_err(From::from)
    }

    /// Initialize a global logger (without extra files)
    pub fn init_terminal_only(verbose: bool) -> Result<(), log::SetLoggerError> {
        log::set_max_level(terminal_level(verbose));
        log::set_logger(&TerminalOnly)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Debug
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.level() <= self.terminal_level {
            eprintln!("{}", record.args());
        }
        // Regardless, log to debug log with timestamp and log level
        if let Ok(mut debug_log) = self.debug_log.lock() {
            let _ = writeln!(
                debug_log,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%F %T%.6f%z"),
                record.level(),
                record.target(),
                record.args(),
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut debug_log) = self.debug_log.lock() {
            let _ = debug_log.flush();
        }
    }
}
