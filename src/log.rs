use slog::{o, Drain, Logger};
use std::sync::atomic::{AtomicBool, Ordering};

/// Installs the process-wide logger. Later calls are no-ops, so any entry
/// point (or test) may call this without coordination. Filtering follows
/// the usual `RUST_LOG` conventions via slog-envlogger.
pub fn setup() {
    static INSTALLED: AtomicBool = AtomicBool::new(false);
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build();
    let drain = slog_envlogger::new(drain);
    let drain = std::sync::Mutex::new(drain).fuse();
    let logger = Logger::root(drain, o!());
    let guard = slog_scope::set_global_logger(logger);
    guard.cancel_reset();
    slog_stdlog::init().ok();
}
