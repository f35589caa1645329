//! Identifier sources for new medicines.
//!
//! Generators are untrusted: nothing here promises uniqueness, and the
//! store reports a repeated id as [`Error::DuplicateId`](crate::Error::DuplicateId).

use crate::MedicineId;
use chrono::Utc;

/// Supplies an id for each new medicine
pub trait IdGenerator {
    fn next_id(&mut self) -> MedicineId;
}

/// Last four digits of the current Unix time in seconds
///
/// Two medicines added within the same second receive the same id.
#[derive(Clone, Debug, Default)]
pub struct ClockIdGenerator;

impl IdGenerator for ClockIdGenerator {
    fn next_id(&mut self) -> MedicineId {
        Utc::now().timestamp().rem_euclid(10_000) as MedicineId
    }
}

/// Counts upward from a starting value
#[derive(Clone, Debug)]
pub struct SequentialIdGenerator {
    next: MedicineId,
}

impl SequentialIdGenerator {
    pub fn starting_at(first: MedicineId) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> MedicineId {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}
