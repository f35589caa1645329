//! Medication tracker: keeps the store, the schedule and the adherence log
//! consistent with each other.
//!
//! The tracker is the only owner of the three structures. Callers reach
//! them exclusively through its methods:
//! - Adding writes the canonical record to the store and a snapshot to the
//!   schedule
//! - Marking resolves the id through the store, then appends to the log
//! - Removing deletes from the store and purges the schedule snapshot

use crate::history::AdherenceLog;
use crate::ids::{ClockIdGenerator, IdGenerator};
use crate::queue::ScheduleQueue;
use crate::stats::DailyStatistics;
use crate::store::MedicineStore;
use crate::{
    AdherenceStatus, Config, Error, HistoryEntry, Medicine, MedicineId, NewMedicine, Result,
};
use chrono::{DateTime, TimeZone};

/// Session state for one interactive run
pub struct MedicationTracker {
    store: MedicineStore,
    queue: ScheduleQueue,
    log: AdherenceLog,
    ids: Box<dyn IdGenerator>,
}

impl MedicationTracker {
    /// Build a tracker sized from configuration, using clock-based ids
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_id_generator(config, Box::new(ClockIdGenerator))
    }

    /// Build a tracker with a caller-supplied id source
    pub fn with_id_generator(config: &Config, ids: Box<dyn IdGenerator>) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            "Creating tracker (store capacity {}, queue capacity {})",
            config.store.capacity,
            config.queue.capacity
        );
        Ok(Self {
            store: MedicineStore::try_with_capacity(config.store.capacity)?,
            queue: ScheduleQueue::try_with_capacity(config.queue.capacity)?,
            log: AdherenceLog::new(),
            ids,
        })
    }

    /// Register a medicine in the store and the schedule
    ///
    /// A store failure leaves both structures untouched. If the store
    /// accepts the record but the schedule is full, the record stays stored
    /// and [`Error::PartiallyAdded`] is returned.
    pub fn add_medicine(&mut self, fields: NewMedicine) -> Result<Medicine> {
        let id = self.ids.next_id();
        let medicine = Medicine::new(id, fields);

        self.store.insert(medicine.clone())?;

        if let Err(e) = self.queue.push(medicine.clone()) {
            tracing::warn!("Medicine {} stored but not scheduled: {}", id, e);
            return Err(Error::PartiallyAdded {
                id,
                source: Box::new(e),
            });
        }

        tracing::info!(
            "Added medicine {} ({}) at {}",
            id,
            medicine.name,
            medicine.time
        );
        Ok(medicine)
    }

    pub fn find_medicine(&self, id: MedicineId) -> Result<&Medicine> {
        self.store.find(id)
    }

    /// Delete a medicine and its schedule snapshot
    ///
    /// History entries that reference it are kept.
    pub fn remove_medicine(&mut self, id: MedicineId) -> Result<Medicine> {
        let removed = self.store.delete(id)?;
        if self.queue.remove_by_id(id).is_none() {
            tracing::debug!("Medicine {} had no schedule entry to purge", id);
        }
        tracing::info!("Removed medicine {} ({})", id, removed.name);
        Ok(removed)
    }

    pub fn mark_taken(&mut self, id: MedicineId) -> Result<&HistoryEntry> {
        self.mark(id, AdherenceStatus::Taken)
    }

    pub fn mark_missed(&mut self, id: MedicineId) -> Result<&HistoryEntry> {
        self.mark(id, AdherenceStatus::Missed)
    }

    fn mark(&mut self, id: MedicineId, status: AdherenceStatus) -> Result<&HistoryEntry> {
        let medicine = self.store.find(id)?;
        let entry = self.log.append(medicine.id, &medicine.name, status)?;
        tracing::info!("Marked medicine {} as {}", id, status);
        Ok(entry)
    }

    /// Stored medicines in table order
    pub fn medicines(&self) -> impl Iterator<Item = &Medicine> + '_ {
        self.store.iter()
    }

    pub fn medicine_count(&self) -> usize {
        self.store.len()
    }

    /// Scheduled snapshots in ascending time order
    pub fn schedule(&self) -> Vec<Medicine> {
        self.queue.snapshot_sorted_by_time()
    }

    /// Adherence events, newest first
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.log.iter()
    }

    pub fn history_len(&self) -> usize {
        self.log.len()
    }

    /// Taken/missed counts for the calendar day of `reference`
    pub fn daily_statistics<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> DailyStatistics {
        DailyStatistics::new(self.store.len(), self.log.aggregate_for_day(reference))
    }
}
