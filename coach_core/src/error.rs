//! Error types for the coach_core library.

use crate::types::{ClientId, ExerciseId};
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for coach_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The current-workout slot is empty
    #[error("No workout in progress")]
    NoCurrentWorkout,

    /// A workout is already occupying the current-workout slot
    #[error("A workout is already in progress")]
    WorkoutInProgress,

    #[error("Exercise {0} not found in the current workout")]
    ExerciseNotFound(ExerciseId),

    #[error("Exercise {exercise} has no set number {set_number}")]
    SetNotFound {
        exercise: ExerciseId,
        set_number: u32,
    },

    #[error("Client {0} not found")]
    ClientNotFound(ClientId),

    #[error("Client {0} has no assigned workouts")]
    NoAssignedWorkout(ClientId),

    /// Input rejected before touching the store
    #[error("Invalid input: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_entity() {
        let err = Error::SetNotFound {
            exercise: ExerciseId(2),
            set_number: 7,
        };
        assert_eq!(err.to_string(), "Exercise 2 has no set number 7");
    }
}
