use crate::models::args::Cli;
use fh_logger::{LevelFilter, Logger};

const LOGGER_NAME: &str = "forgehand";

/// Installs the global subscriber according to `-v`, `--log-dir` and `--log-json`.
///
/// # Errors
/// Returns an error if the log directory is unusable or a subscriber is already set.
pub fn init(cli: &Cli) -> anyhow::Result<Logger> {
    let builder = Logger::builder().name(LOGGER_NAME).level(level_for(cli.verbose));

    let logger = match &cli.log_dir {
        Some(dir) => builder.log_dir(dir).json(cli.log_json).init()?,
        None => builder.init()?,
    };

    Ok(logger)
}

const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), LevelFilter::WARN);
        assert_eq!(level_for(1), LevelFilter::INFO);
        assert_eq!(level_for(5), LevelFilter::DEBUG);
    }
}
