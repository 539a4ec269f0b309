use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    filter: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stderr = std::io::stderr().lock();
        let _ = if self.filter >= LevelFilter::Debug {
            writeln!(
                stderr,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(stderr, "[{}] {}", record.level(), record.args())
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Pick the level: a parseable `RUST_LOG` value wins, then the verbosity
/// flags, then `Info`.
pub fn level_filter(env: Option<&str>, quiet: bool, verbose: bool) -> LevelFilter {
    if let Some(filter) = env.and_then(|s| s.parse().ok()) {
        return filter;
    }
    match (quiet, verbose) {
        (_, true) => LevelFilter::Debug,
        (true, false) => LevelFilter::Warn,
        (false, false) => LevelFilter::Info,
    }
}

/// Initialize the global logger. Later calls are ignored.
pub fn init(filter: LevelFilter) {
    if log::set_boxed_logger(Box::new(StderrLogger { filter })).is_ok() {
        log::set_max_level(filter);
    }
}
