//! Error types for the CLI application.

use std::fmt;

use holdem_engine::errors::GameError;

use crate::config::ConfigError;

/// Every failure a command can report; all of them map to exit code `2`.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Error raised by the engine while playing a round
    Engine(GameError),

    /// Broken internal invariant (e.g. chips created or lost in a simulation)
    Internal(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_source() {
        let e = CliError::from(GameError::NotEnoughPlayers { found: 1 });
        assert_eq!(
            e.to_string(),
            "Engine error: At least two players with chips are needed, found 1"
        );
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn invalid_input_display() {
        let e = CliError::InvalidInput("rounds must be >= 1".into());
        assert_eq!(e.to_string(), "Invalid input: rounds must be >= 1");
    }
}
