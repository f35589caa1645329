#![forbid(unsafe_code)]

//! Core data structures and orchestration for PillPilot.
//!
//! This crate provides:
//! - Domain types (medicines, scheduled times, history entries)
//! - A fixed-capacity open-addressed medicine store
//! - A fixed-capacity min-heap schedule
//! - An append-only adherence log
//! - The tracker that keeps the three consistent, plus adherence statistics

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod ids;
pub mod store;
pub mod queue;
pub mod history;
pub mod stats;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use ids::{ClockIdGenerator, IdGenerator, SequentialIdGenerator};
pub use store::MedicineStore;
pub use queue::ScheduleQueue;
pub use history::{AdherenceLog, DayTally};
pub use stats::{compute_adherence, AdherenceBand, DailyStatistics};
pub use tracker::MedicationTracker;
