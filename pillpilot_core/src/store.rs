//! Fixed-capacity medicine table with open addressing.
//!
//! Slots are addressed by `id % capacity` and collisions probe linearly
//! (`+1 mod capacity`). Deleted slots become tombstones rather than empty
//! slots, so a probe chain that once passed through a deleted record still
//! reaches the records stored beyond it. Inserts reuse the first tombstone
//! on the chain once the rest of the chain has been checked for the same id.

use crate::{Error, Medicine, MedicineId, Result};

/// Presence marker for one table slot
#[derive(Clone, Debug)]
enum Slot {
    Empty,
    Tombstone,
    Occupied(Medicine),
}

/// Canonical owner of every stored [`Medicine`]
#[derive(Clone, Debug)]
pub struct MedicineStore {
    slots: Vec<Slot>,
    count: usize,
}

/// Result of walking a probe chain for one id
enum Probe {
    /// Slot index holding the id
    Found(usize),
    /// Id absent; first reusable slot on the chain, if any
    Vacant(Option<usize>),
}

impl MedicineStore {
    /// Create an empty store with `capacity` preallocated slots
    ///
    /// Fails with [`Error::Config`] for a zero capacity and with
    /// [`Error::AllocationFailure`] if the slots cannot be reserved.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Config(
                "medicine store capacity must be at least 1".into(),
            ));
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || Slot::Empty);
        Ok(Self { slots, count: 0 })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn home_slot(&self, id: MedicineId) -> usize {
        id as usize % self.slots.len()
    }

    /// Walk the probe chain for `id` until it is found, an empty slot ends
    /// the chain, or the walk returns to the home slot.
    fn probe(&self, id: MedicineId) -> Probe {
        let capacity = self.slots.len();
        let origin = self.home_slot(id);
        let mut first_free = None;

        for step in 0..capacity {
            let index = (origin + step) % capacity;
            match &self.slots[index] {
                Slot::Occupied(med) if med.id == id => return Probe::Found(index),
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    first_free.get_or_insert(index);
                }
                Slot::Empty => {
                    return Probe::Vacant(Some(first_free.unwrap_or(index)));
                }
            }
        }

        Probe::Vacant(first_free)
    }

    /// Store a record in the first free slot of its probe chain
    ///
    /// Fails with [`Error::DuplicateId`] if the id is already stored and with
    /// [`Error::StoreFull`] if the chain wraps around without a free slot.
    pub fn insert(&mut self, medicine: Medicine) -> Result<()> {
        let id = medicine.id;
        match self.probe(id) {
            Probe::Found(_) => {
                tracing::warn!("Rejected duplicate medicine ID {}", id);
                Err(Error::DuplicateId(id))
            }
            Probe::Vacant(None) => {
                tracing::warn!("Medicine store full, cannot insert ID {}", id);
                Err(Error::StoreFull {
                    capacity: self.capacity(),
                })
            }
            Probe::Vacant(Some(index)) => {
                tracing::debug!(
                    "Inserted medicine ID {} at slot {} (home {})",
                    id,
                    index,
                    self.home_slot(id)
                );
                self.slots[index] = Slot::Occupied(medicine);
                self.count += 1;
                Ok(())
            }
        }
    }

    /// Look up a record by id
    pub fn find(&self, id: MedicineId) -> Result<&Medicine> {
        match self.probe(id) {
            Probe::Found(index) => match &self.slots[index] {
                Slot::Occupied(med) => Ok(med),
                _ => Err(Error::NotFound(id)),
            },
            Probe::Vacant(_) => Err(Error::NotFound(id)),
        }
    }

    pub fn contains(&self, id: MedicineId) -> bool {
        matches!(self.probe(id), Probe::Found(_))
    }

    /// Remove a record, leaving a tombstone in its slot
    pub fn delete(&mut self, id: MedicineId) -> Result<Medicine> {
        let Probe::Found(index) = self.probe(id) else {
            return Err(Error::NotFound(id));
        };

        match std::mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(med) => {
                self.count -= 1;
                tracing::debug!("Deleted medicine ID {} from slot {}", id, index);
                Ok(med)
            }
            other => {
                self.slots[index] = other;
                Err(Error::NotFound(id))
            }
        }
    }

    /// Occupied records in slot order
    ///
    /// The order follows the table layout, not insertion or schedule time.
    pub fn iter(&self) -> impl Iterator<Item = &Medicine> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(med) => Some(med),
            _ => None,
        })
    }
}
