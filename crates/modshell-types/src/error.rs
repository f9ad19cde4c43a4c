//! Error types for modshell.
//!
//! The `Display` text of every user-facing variant is the exact diagnostic
//! line the interpreter writes to the console.

use std::io;

/// Errors produced by the modshell interpreter.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Too many parameters (max {max})")]
    TooManyArguments { max: usize },

    #[error("Unrecognized command")]
    EmptyCommand,

    #[error("Unrecognized command: {0}")]
    UnrecognizedCommand(String),

    #[error("Illegal module {0}")]
    IllegalModule(String),

    #[error("Missing parameter")]
    MissingParameter,

    #[error("Module name {0} is too long, default is not changed")]
    ModuleNameTooLong(String),

    #[error("Illegal module {0}, default is not changed")]
    ModuleNotFound(String),

    #[error("command {command} not found in module {module}")]
    CommandNotFound { module: String, command: String },

    #[error("command reported failure ({0})")]
    CommandReportedFailure(i32),

    #[error("module registry full (capacity {capacity})")]
    RegistryFull { capacity: usize },

    #[error("{0} handler already registered")]
    HookAlreadySet(&'static str),

    #[error("line queue closed")]
    QueueClosed,

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ShellError {
    /// Whether the command resolver prints this error as a console
    /// diagnostic before falling back.
    ///
    /// A command missing from an otherwise valid module is silent; the
    /// executor reports it as unrecognized instead.
    pub fn is_resolver_diagnostic(&self) -> bool {
        matches!(
            self,
            Self::EmptyCommand
                | Self::UnrecognizedCommand(_)
                | Self::IllegalModule(_)
                | Self::MissingParameter
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
