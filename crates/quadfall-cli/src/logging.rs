use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Where log lines go for a given command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogTarget {
    /// Terminal UI owns the screen; log only to an explicit file.
    FileOnly,
    /// Headless commands may also log to stderr.
    Stderr,
}

/// `-v` count to level: warnings by default, each flag one step louder.
pub(crate) fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub(crate) fn init(verbose: u8, log_file: Option<&Path>, target: LogTarget) -> anyhow::Result<()> {
    let filter = LevelFilter::from_level(verbosity_level(verbose));
    match (log_file, target) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .try_init()?;
        }
        (None, LogTarget::Stderr) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(false).with_writer(io::stderr))
                .with(filter)
                .try_init()?;
        }
        (None, LogTarget::FileOnly) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_level() {
        assert_eq!(verbosity_level(0), Level::WARN);
        assert_eq!(verbosity_level(1), Level::INFO);
        assert_eq!(verbosity_level(2), Level::DEBUG);
        assert_eq!(verbosity_level(3), Level::TRACE);
        assert_eq!(verbosity_level(u8::MAX), Level::TRACE);
    }
}
