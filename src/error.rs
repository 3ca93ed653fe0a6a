//! Error types
//!
//! One enum per failure class:
//! - ConfigError: the settings file is unreadable or lacks a section/key
//! - PathError: input/output paths rejected before the tool is invoked
//! - InvocationError: ffmpeg missing, failed to start, or exited unsuccessfully

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or writing the settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("failed to write settings file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings section [{0}] does not exist")]
    MissingSection(String),

    #[error("settings key '{key}' not found in section [{section}]")]
    MissingKey { section: String, key: String },

    #[error("settings key '{key}' is not a boolean: '{value}'")]
    InvalidBoolean { key: String, value: String },
}

/// Input/output paths that cannot produce a sensible command
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("no input file selected")]
    EmptyInputPath,

    #[error("input path '{0}' does not name a file")]
    MissingFileName(String),

    #[error("output file name would be empty for input '{0}'")]
    EmptyOutputName(String),

    #[error("input file '{0}' does not exist")]
    InputNotFound(String),

    #[error("output directory '{0}' does not exist")]
    OutputDirNotFound(String),

    #[error("output path '{0}' is the same as the input file")]
    OutputIsInput(String),
}

/// Failures running the external converter
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("ffmpeg not found: '{0}' is not on PATH and no bundled copy exists")]
    ToolNotFound(String),

    #[error("failed to start {tool:?}: {source}")]
    Spawn {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ffmpeg exited with status {code}")]
    ExitStatus { code: i32 },

    #[error("ffmpeg was terminated before it finished")]
    Terminated,

    #[error("console pause failed: {0}")]
    Pause(#[source] std::io::Error),
}

/// Everything the Convert action can fail with
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Invocation(#[from] InvocationError),
}
