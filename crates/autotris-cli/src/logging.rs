use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Where log records go when no log file is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultTarget {
    /// Write to stderr (headless commands).
    Stderr,
    /// Drop every record (the TUI owns the terminal).
    Disabled,
}

/// Initializes the global logger.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. With `log_file`
/// the records are written there, otherwise to `default_target`.
pub fn init(log_file: Option<&Path>, default_target: DefaultTarget) -> anyhow::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => match default_target {
            DefaultTarget::Stderr => {
                builder.target(Target::Stderr);
            }
            DefaultTarget::Disabled => return Ok(()),
        },
    }
    builder.try_init().context("Failed to initialize logger")?;
    Ok(())
}
