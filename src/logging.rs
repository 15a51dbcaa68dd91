use log::LevelFilter;
use syslog::{BasicLogger, Facility, Formatter3164};

/// Routes the `log` facade to the system log, tagged with `program_id`.
///
/// Only errors are let through. If the log socket cannot be reached we carry on
/// without a logger: operational detail must never end up on the caller's
/// terminal instead.
pub fn init(program_id: &str) {
    let formatter = Formatter3164 {
        facility: Facility::LOG_AUTHPRIV,
        hostname: None,
        process: program_id.to_owned(),
        pid: std::process::id(),
    };
    let logger = match syslog::unix(formatter) {
        Ok(logger) => logger,
        Err(_) => return,
    };
    if log::set_boxed_logger(Box::new(BasicLogger::new(logger))).is_ok() {
        log::set_max_level(LevelFilter::Error);
    }
}
