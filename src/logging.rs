use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

/// Console logging used when no `log4rs.yml` is present
pub fn console_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        // CDP traffic is extremely chatty at debug
        .logger(Logger::builder().build("headless_chrome", LevelFilter::Warn))
        .logger(Logger::builder().build("tungstenite", LevelFilter::Warn))
        .build(Root::builder().appender("stdout").build(level))?;

    Ok(config)
}

/// Initialise logging from `log4rs.yml`, or the console defaults
pub fn init(verbose: bool) -> Result<(), Box<dyn Error>> {
    let path = Path::new(LOG_CONFIG_FILE);
    if path.exists() {
        log4rs::init_file(path, Default::default())?;
        return Ok(());
    }

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    log4rs::init_config(console_config(level)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_config_builds() {
        let config = console_config(LevelFilter::Info).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Info);
        assert!(config
            .loggers()
            .iter()
            .any(|l| l.name() == "headless_chrome" && l.level() == LevelFilter::Warn));
    }
}
