//! Core domain types for PillPilot.
//!
//! This module defines the records shared by the store, the schedule and the
//! adherence log:
//! - Medicines and their scheduled time
//! - History entries and their status tag

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier handed out by an [`IdGenerator`](crate::ids::IdGenerator).
///
/// Uniqueness is not guaranteed by the source.
pub type MedicineId = u32;

// ============================================================================
// Scheduled Time
// ============================================================================

/// Time of day a medicine is due, at minute resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduledTime {
    hour: u8,
    minute: u8,
}

impl ScheduledTime {
    /// Build a time from hour (0-23) and minute (0-59)
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::InvalidTime(format!("{}:{:02}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight, e.g. 08:30 = 510
    pub fn priority(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl FromStr for ScheduledTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidTime(trimmed.to_string());

        let (hour, minute) = trimmed.split_once(':').ok_or_else(invalid)?;
        if hour.is_empty()
            || hour.len() > 2
            || minute.len() != 2
            || !hour.bytes().all(|b| b.is_ascii_digit())
            || !minute.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ScheduledTime {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ScheduledTime> for String {
    fn from(time: ScheduledTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ScheduledTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ============================================================================
// Medicine
// ============================================================================

/// Caller-supplied fields for a new medicine
#[derive(Clone, Debug)]
pub struct NewMedicine {
    pub name: String,
    pub dosage: String,
    pub time: ScheduledTime,
    pub instructions: String,
}

/// A scheduled medicine record
///
/// `priority` is fixed from `time` when the record is built and has no setter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub dosage: String,
    pub time: ScheduledTime,
    pub instructions: String,
    priority: u16,
}

impl Medicine {
    pub fn new(id: MedicineId, fields: NewMedicine) -> Self {
        let NewMedicine {
            name,
            dosage,
            time,
            instructions,
        } = fields;
        Self {
            id,
            name,
            dosage,
            priority: time.priority(),
            time,
            instructions,
        }
    }

    /// Minutes since midnight of the scheduled time
    pub fn priority(&self) -> u16 {
        self.priority
    }
}

// ============================================================================
// Adherence History
// ============================================================================

/// Outcome recorded against a scheduled dose
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdherenceStatus {
    Taken,
    Missed,
}

impl fmt::Display for AdherenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdherenceStatus::Taken => f.write_str("taken"),
            AdherenceStatus::Missed => f.write_str("missed"),
        }
    }
}

/// One immutable adherence event
///
/// `medicine_name` is copied at append time and does not follow later edits
/// or deletion of the medicine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub medicine_id: MedicineId,
    pub medicine_name: String,
    pub status: AdherenceStatus,
    pub recorded_at: DateTime<Utc>,
}
