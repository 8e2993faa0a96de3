//! Error types for command handling and configuration.
//!
//! Command errors are not faults: the engine ignores rejected commands and
//! only reports them back as events.

use std::fmt;

use crate::enums::GamePhase;

/// Why a player command had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The command is not accepted in the current phase.
    InvalidPhase {
        /// Name of the rejected command.
        command: &'static str,
        /// Phase the engine was in.
        phase: GamePhase,
    },
    /// The purchase costs more than the current score.
    InsufficientFunds {
        cost: u64,
        score: u64,
    },
    /// A shot is already waiting for this tick's input step.
    FireAlreadyPending,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidPhase { command, phase } => {
                write!(f, "{command} is not valid during {phase:?}")
            }
            CommandError::InsufficientFunds { cost, score } => {
                write!(f, "insufficient funds: cost {cost}, score {score}")
            }
            CommandError::FireAlreadyPending => {
                write!(f, "a shot is already pending this tick")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Result type for command handlers.
pub type CommandResult<T> = Result<T, CommandError>;

/// Why a `SimConfig` cannot host a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A world dimension is zero, negative or not finite.
    InvalidDimension {
        field: &'static str,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimension { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for config validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
