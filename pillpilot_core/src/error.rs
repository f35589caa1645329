//! Error types for the pillpilot_core library.

use crate::types::MedicineId;
use std::collections::TryReserveError;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pillpilot_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every slot on the probe cycle is occupied
    #[error("medicine store is full (capacity {capacity})")]
    StoreFull { capacity: usize },

    /// The schedule heap has reached its capacity
    #[error("schedule queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    /// No medicine with this identifier is stored
    #[error("no medicine with ID {0}")]
    NotFound(MedicineId),

    /// The identifier generator produced an ID that is already stored
    #[error("medicine ID {0} is already in use")]
    DuplicateId(MedicineId),

    /// Stored, but the schedule copy could not be queued
    #[error("medicine {id} was stored but is missing from the schedule: {source}")]
    PartiallyAdded {
        id: MedicineId,
        #[source]
        source: Box<Error>,
    },

    /// History append could not reserve memory
    #[error("allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// Scheduled time text was not a valid HH:MM
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
