//! Core error types for focusflow-core.
//!
//! Two families live here: [`ValidationError`] for user intents the session
//! refuses (these carry the exact message shown to the user), and
//! [`CoreError`] for ambient failures such as a broken config file.

use std::path::PathBuf;
use thiserror::Error;

use crate::task::TaskId;

/// Core error type for focusflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Could not locate or create the configuration directory
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// A user intent the session refused.
///
/// Rejections are not failures of the program: the attempted action is
/// blocked and the message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task name cannot be empty")]
    EmptyTitle,

    #[error("Add at least one task before starting the timer")]
    NoTasks,

    #[error("All tasks are completed. Please add a new task to continue.")]
    AllTasksCompleted,

    #[error("This task is already completed. Please select an incomplete task.")]
    TaskAlreadyCompleted,

    #[error("Task {0} not found")]
    TaskNotFound(TaskId),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
