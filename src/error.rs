use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems loading or validating [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that stop a game session from starting or continuing.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no terminal to render into: stdout is not a TTY")]
    MissingTerminal,

    #[error(
        "terminal too small: need {needed_cols}x{needed_rows}, have {available_cols}x{available_rows}"
    )]
    TerminalTooSmall {
        needed_cols: u16,
        needed_rows: u16,
        available_cols: u16,
        available_rows: u16,
    },

    #[error("no free cell left for food after {attempts} attempts")]
    ExhaustedSpawnSpace { attempts: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}
