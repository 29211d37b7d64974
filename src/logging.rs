use log::LevelFilter;
use std::io::Write;

pub fn level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the stderr logger. Called once from `main` after the arguments
/// are parsed.
pub fn init(debug: bool) {
    env_logger::Builder::new()
        .filter_level(level(debug))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {} ({}:{})",
                buf.timestamp(),
                record.level(),
                record.args(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0)
            )
        })
        .init();
}
