
use config::{self, LogFormat};
use errors::*;
use slog::{Drain, Level, Logger};
use slog_async;
use slog_json;
use slog_term;
use std::io;
use std::str::FromStr;

pub fn parse_level(name: &str) -> Result<Level> {
    Level::from_str(name).map_err(|_| format!("Unknown log level \"{}\"", name).into())
}

pub fn build_logger(settings: &config::Log) -> Result<Logger> {
    let level = parse_level(&settings.level)?;
    let drain = match settings.format {
        LogFormat::Term => {
            let decorator = slog_term::TermDecorator::new().stderr().build();
            let drain = slog_term::FullFormat::new(decorator).build().fuse();
            slog_async::Async::new(drain).build().fuse()
        }
        LogFormat::Json => {
            let drain = slog_json::Json::default(io::stderr()).fuse();
            slog_async::Async::new(drain).build().fuse()
        }
    };
    let drain = drain.filter_level(level).fuse();
    Ok(Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_slog_level_names() {
        assert_eq!(parse_level("info").unwrap(), Level::Info);
        assert_eq!(parse_level("trace").unwrap(), Level::Trace);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn builds_both_formats() {
        let mut settings = config::Log::default();
        assert!(build_logger(&settings).is_ok());
        settings.format = LogFormat::Json;
        assert!(build_logger(&settings).is_ok());
    }
}
