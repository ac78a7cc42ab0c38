//! Log setup for the binaries, built on log4rs.
//!
//! The library only uses the `log` macros; nothing is printed until a binary
//! calls [`init_log`].

use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// Parses a level name for a command-line flag.
pub fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse::<LevelFilter>().map_err(|_| {
        format!(
            "Unknown log level '{}'. Expected off, error, warn, info, debug or trace",
            s
        )
    })
}

/// Initialises logging at `level`, to `file_path` if given, otherwise stderr.
pub fn init_log(level: LevelFilter, file_path: Option<&str>) -> Result<(), String> {
    let appender: Box<dyn log4rs::append::Append> = match file_path {
        Some(path) => Box::new(
            FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new(PATTERN)))
                .build(path)
                .map_err(|e| format!("Failed to open log file {}: {}", path, e))?,
        ),
        None => Box::new(
            ConsoleAppender::builder()
                .target(Target::Stderr)
                .encoder(Box::new(PatternEncoder::new(PATTERN)))
                .build(),
        ),
    };

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("main", appender),
        )
        .build(Root::builder().appender("main").build(level))
        .map_err(|e| format!("Invalid log configuration: {}", e))?;

    log4rs::init_config(config).map_err(|e| format!("Failed to initialise logging: {}", e))?;
    Ok(())
}
