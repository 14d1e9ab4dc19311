//! Error types for command execution

use thiserror::Error;

/// Command execution errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// A shutdown signal arrived before the operation started
    #[error("interrupted")]
    Interrupted,
}
