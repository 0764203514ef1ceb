// src/errors.rs

//! Crate-wide error type and exit-code mapping.

use std::path::PathBuf;

use thiserror::Error;

/// Process exit codes, one per error class.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME: i32 = 1;
    /// Returned by clap itself for invalid command-line arguments.
    pub const USAGE: i32 = 2;
    pub const INPUT_IO: i32 = 3;
    pub const INPUT_FORMAT: i32 = 4;
    pub const SETTINGS: i32 = 5;
}

#[derive(Error, Debug)]
pub enum ContendError {
    #[error("cannot read input file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input at line {line}: {message} (line: {text:?})")]
    Parse {
        line: usize,
        message: String,
        text: String,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("worker for task '{task}' failed: {reason}")]
    WorkerFailed { task: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ContendError {
    /// Exit code the process should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ContendError::Io { .. } => exit_code::INPUT_IO,
            ContendError::Parse { .. } => exit_code::INPUT_FORMAT,
            ContendError::Settings(_) | ContendError::Toml(_) => exit_code::SETTINGS,
            ContendError::WorkerFailed { .. } | ContendError::Other(_) => exit_code::RUNTIME,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ContendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classes_map_to_distinct_exit_codes() {
        let io = ContendError::Io {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let parse = ContendError::Parse {
            line: 3,
            message: "unknown directive".into(),
            text: "bogus".into(),
        };
        let settings = ContendError::Settings("bad".into());

        let codes = [
            exit_code::USAGE,
            io.exit_code(),
            parse.exit_code(),
            settings.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, exit_code::SUCCESS);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
