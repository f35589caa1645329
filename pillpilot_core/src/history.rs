//! Adherence history, newest entry first.
//!
//! The log is append-only for the life of the process. Entries are kept in
//! a `VecDeque` used strictly as a stack: appends go to the front, so forward
//! iteration yields the most recent event first.

use crate::{AdherenceStatus, HistoryEntry, MedicineId, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::VecDeque;

/// Taken/missed counts for one calendar day
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DayTally {
    pub taken: usize,
    pub missed: usize,
}

/// Unbounded head-inserted chain of [`HistoryEntry`] values
#[derive(Clone, Debug, Default)]
pub struct AdherenceLog {
    entries: VecDeque<HistoryEntry>,
}

impl AdherenceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record an event stamped with the current time
    pub fn append(
        &mut self,
        medicine_id: MedicineId,
        medicine_name: &str,
        status: AdherenceStatus,
    ) -> Result<&HistoryEntry> {
        self.append_at(medicine_id, medicine_name, status, Utc::now())
    }

    /// Record an event with an explicit timestamp
    ///
    /// Fails with [`Error::AllocationFailure`](crate::Error::AllocationFailure)
    /// if memory for the entry cannot be reserved; the log is unchanged then.
    pub fn append_at(
        &mut self,
        medicine_id: MedicineId,
        medicine_name: &str,
        status: AdherenceStatus,
        recorded_at: DateTime<Utc>,
    ) -> Result<&HistoryEntry> {
        self.entries.try_reserve(1)?;
        self.entries.push_front(HistoryEntry {
            medicine_id,
            medicine_name: medicine_name.to_owned(),
            status,
            recorded_at,
        });
        tracing::debug!(
            "Logged {} for medicine ID {} ({} entries)",
            status,
            medicine_id,
            self.entries.len()
        );
        Ok(&self.entries[0])
    }

    /// Entries from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    /// Count taken and missed events on the calendar day of `reference`
    ///
    /// Days are compared in the reference's own time zone. Every call scans
    /// the whole log.
    pub fn aggregate_for_day<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> DayTally {
        let zone = reference.timezone();
        let day = reference.date_naive();

        self.entries
            .iter()
            .filter(|entry| entry.recorded_at.with_timezone(&zone).date_naive() == day)
            .fold(DayTally::default(), |mut tally, entry| {
                match entry.status {
                    AdherenceStatus::Taken => tally.taken += 1,
                    AdherenceStatus::Missed => tally.missed += 1,
                }
                tally
            })
    }
}

impl<'a> IntoIterator for &'a AdherenceLog {
    type Item = &'a HistoryEntry;
    type IntoIter = std::collections::vec_deque::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    // AllocationFailure from append_at comes only from the `?` on
    // `try_reserve`, which cannot be made to fail cheaply here.

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_traverse_newest_first() {
        let mut log = AdherenceLog::new();
        log.append(1, "A", AdherenceStatus::Taken).unwrap();
        log.append(2, "B", AdherenceStatus::Missed).unwrap();
        log.append(3, "C", AdherenceStatus::Taken).unwrap();

        let names: Vec<_> = log.iter().map(|e| e.medicine_name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
        // Restartable
        assert_eq!(log.iter().count(), 3);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_append_returns_new_head() {
        let mut log = AdherenceLog::new();
        let entry = log.append(7, "Warfarin", AdherenceStatus::Missed).unwrap();
        assert_eq!(entry.medicine_id, 7);
        assert_eq!(entry.status, AdherenceStatus::Missed);
    }

    #[test]
    fn test_name_is_a_snapshot() {
        let mut log = AdherenceLog::new();
        let mut name = String::from("Old name");
        log.append(1, &name, AdherenceStatus::Taken).unwrap();
        name.push_str(" (renamed)");

        assert_eq!(log.iter().next().unwrap().medicine_name, "Old name");
    }

    #[test]
    fn test_aggregate_counts_only_reference_day() {
        let mut log = AdherenceLog::new();
        log.append_at(1, "A", AdherenceStatus::Taken, at("2026-03-09T23:30:00Z"))
            .unwrap();
        log.append_at(1, "A", AdherenceStatus::Taken, at("2026-03-10T08:30:00Z"))
            .unwrap();
        log.append_at(2, "B", AdherenceStatus::Missed, at("2026-03-10T12:00:00Z"))
            .unwrap();
        log.append_at(1, "A", AdherenceStatus::Taken, at("2026-03-10T20:00:00Z"))
            .unwrap();
        log.append_at(2, "B", AdherenceStatus::Missed, at("2027-03-10T12:00:00Z"))
            .unwrap();

        let tally = log.aggregate_for_day(&at("2026-03-10T15:00:00Z"));
        assert_eq!(tally, DayTally { taken: 2, missed: 1 });
    }

    #[test]
    fn test_aggregate_uses_reference_time_zone() {
        let mut log = AdherenceLog::new();
        // 23:30 UTC on the 9th is already the 10th at UTC+2
        log.append_at(1, "A", AdherenceStatus::Taken, at("2026-03-09T23:30:00Z"))
            .unwrap();

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let reference = at("2026-03-10T09:00:00Z").with_timezone(&plus_two);
        assert_eq!(log.aggregate_for_day(&reference).taken, 1);

        let utc_reference = at("2026-03-10T09:00:00Z");
        assert_eq!(log.aggregate_for_day(&utc_reference).taken, 0);
    }

    #[test]
    fn test_aggregate_empty_log() {
        let log = AdherenceLog::new();
        let tally = log.aggregate_for_day(&(Utc::now() - Duration::days(1)));
        assert_eq!(tally, DayTally::default());
    }
}
