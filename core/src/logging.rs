use std::env;

use log::LevelFilter;

pub const LOG_ENV: &str = "RUNLOAD_LOG";

/// Nivå fra tekst; ukjent eller tom verdi gir INFO.
pub fn level_from_str(verbosity: &str) -> LevelFilter {
    match verbosity.trim().to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Installerer fern-logger til stderr. Nivå styres av `RUNLOAD_LOG`.
pub fn setup_logging() -> Result<(), fern::InitError> {
    let verbosity = env::var(LOG_ENV).unwrap_or_default();

    fern::Dispatch::new()
        .level(level_from_str(&verbosity))
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(level_from_str("debug"), LevelFilter::Debug);
        assert_eq!(level_from_str("OFF"), LevelFilter::Off);
        assert_eq!(level_from_str(""), LevelFilter::Info);
        assert_eq!(level_from_str("verbose"), LevelFilter::Info);
    }
}
