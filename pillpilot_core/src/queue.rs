//! Time-ordered schedule backed by a fixed-capacity binary min-heap.
//!
//! Entries are snapshots of medicine records keyed by their priority
//! (minutes since midnight). For the node at index `i` the parent is at
//! `(i - 1) / 2` and the children at `2i + 1` and `2i + 2`. Equal priorities
//! keep whatever relative order the sifts leave them in.

use crate::{Error, Medicine, MedicineId, Result};

/// Bounded min-heap of scheduled medicine snapshots
#[derive(Clone, Debug)]
pub struct ScheduleQueue {
    heap: Vec<Medicine>,
    capacity: usize,
}

impl ScheduleQueue {
    /// Create an empty queue holding at most `capacity` entries
    ///
    /// The heap is reserved up front; failure to do so is reported as
    /// [`Error::AllocationFailure`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut heap = Vec::new();
        heap.try_reserve_exact(capacity)?;
        Ok(Self { heap, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Add a snapshot, failing with [`Error::QueueFull`] at capacity
    pub fn push(&mut self, medicine: Medicine) -> Result<()> {
        if self.heap.len() >= self.capacity {
            tracing::warn!(
                "Schedule queue full, cannot enqueue medicine ID {}",
                medicine.id
            );
            return Err(Error::QueueFull {
                capacity: self.capacity,
            });
        }

        self.heap.push(medicine);
        let index = self.sift_up(self.heap.len() - 1);
        tracing::debug!("Enqueued schedule entry at heap index {}", index);
        Ok(())
    }

    /// Earliest scheduled entry without removing it
    pub fn peek_min(&self) -> Option<&Medicine> {
        self.heap.first()
    }

    /// Remove and return the earliest scheduled entry
    pub fn pop_min(&mut self) -> Option<Medicine> {
        if self.heap.is_empty() {
            return None;
        }

        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// Remove the snapshot for `id`, if queued
    ///
    /// Linear scan; the hole is filled from the tail and re-sifted in
    /// whichever direction restores heap order.
    pub fn remove_by_id(&mut self, id: MedicineId) -> Option<Medicine> {
        let index = self.heap.iter().position(|med| med.id == id)?;
        let removed = self.heap.swap_remove(index);
        if index < self.heap.len() {
            let settled = self.sift_up(index);
            if settled == index {
                self.sift_down(index);
            }
        }
        tracing::debug!("Removed schedule entry for medicine ID {}", id);
        Some(removed)
    }

    /// All entries in ascending time order, leaving the heap untouched
    ///
    /// The heap array only guarantees its root, so the entries are copied
    /// out and sorted. Ties are broken by id to keep the view stable.
    pub fn snapshot_sorted_by_time(&self) -> Vec<Medicine> {
        let mut entries = self.heap.clone();
        entries.sort_by_key(|med| (med.priority(), med.id));
        entries
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].priority() < self.heap[parent].priority() {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.heap[left].priority() < self.heap[smallest].priority() {
                smallest = left;
            }
            if right < len && self.heap[right].priority() < self.heap[smallest].priority() {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }

    #[cfg(test)]
    fn is_heap_ordered(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2].priority() <= self.heap[i].priority())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewMedicine;

    fn dose(id: MedicineId, time: &str) -> Medicine {
        Medicine::new(
            id,
            NewMedicine {
                name: format!("Med {}", id),
                dosage: "5ml".into(),
                time: time.parse().unwrap(),
                instructions: String::new(),
            },
        )
    }

    fn priorities(meds: &[Medicine]) -> Vec<u16> {
        meds.iter().map(|m| m.priority()).collect()
    }

    #[test]
    fn test_pop_returns_earliest_first() {
        let mut queue = ScheduleQueue::try_with_capacity(10).unwrap();
        for (id, time) in [(1, "21:00"), (2, "08:30"), (3, "13:15"), (4, "00:05"), (5, "08:00")] {
            queue.push(dose(id, time)).unwrap();
        }

        assert_eq!(queue.peek_min().unwrap().id, 4);

        let mut popped = Vec::new();
        while let Some(med) = queue.pop_min() {
            popped.push(med.priority());
        }
        assert_eq!(popped, vec![5, 480, 510, 795, 1260]);
        assert!(queue.is_empty());
        assert!(queue.pop_min().is_none());
    }

    #[test]
    fn test_push_fails_at_capacity() {
        let mut queue = ScheduleQueue::try_with_capacity(2).unwrap();
        queue.push(dose(1, "09:00")).unwrap();
        queue.push(dose(2, "10:00")).unwrap();

        let err = queue.push(dose(3, "07:00")).unwrap_err();
        assert!(matches!(err, Error::QueueFull { capacity: 2 }));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek_min().unwrap().id, 1);
    }

    #[test]
    fn test_heap_order_holds_under_interleaving() {
        let mut queue = ScheduleQueue::try_with_capacity(64).unwrap();
        let times = [
            "12:00", "06:45", "23:10", "06:45", "00:00", "18:30", "09:15", "09:14", "15:00",
            "01:01", "22:22", "07:07",
        ];
        let mut next_id = 0;

        for (round, time) in times.iter().enumerate() {
            queue.push(dose(next_id, time)).unwrap();
            next_id += 1;
            assert!(queue.is_heap_ordered());

            if round % 3 == 2 {
                let root = queue.pop_min().unwrap().priority();
                assert!(queue.heap.iter().all(|m| root <= m.priority()));
                assert!(queue.is_heap_ordered());
            }
        }

        let min = queue.peek_min().unwrap().priority();
        assert!(queue.heap.iter().all(|m| min <= m.priority()));
    }

    #[test]
    fn test_snapshot_sorted_and_non_destructive() {
        let mut queue = ScheduleQueue::try_with_capacity(10).unwrap();
        for (id, time) in [(1, "20:00"), (2, "07:00"), (3, "12:00"), (4, "06:00"), (5, "19:00")] {
            queue.push(dose(id, time)).unwrap();
        }

        let snapshot = queue.snapshot_sorted_by_time();
        assert_eq!(priorities(&snapshot), vec![360, 420, 720, 1140, 1200]);
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.snapshot_sorted_by_time(), snapshot);
    }

    #[test]
    fn test_remove_by_id_keeps_heap_order() {
        let mut queue = ScheduleQueue::try_with_capacity(10).unwrap();
        for (id, time) in [
            (1, "01:00"),
            (2, "10:00"),
            (3, "02:00"),
            (4, "11:00"),
            (5, "12:00"),
            (6, "03:00"),
            (7, "04:00"),
        ] {
            queue.push(dose(id, time)).unwrap();
        }

        let removed = queue.remove_by_id(4).unwrap();
        assert_eq!(removed.id, 4);
        assert!(queue.is_heap_ordered());
        assert!(queue.remove_by_id(4).is_none());
        assert!(queue.remove_by_id(99).is_none());

        let ids: Vec<_> = queue.snapshot_sorted_by_time().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3, 6, 7, 2, 5]);
    }

    #[test]
    fn test_remove_root_and_tail() {
        let mut queue = ScheduleQueue::try_with_capacity(4).unwrap();
        queue.push(dose(1, "05:00")).unwrap();
        queue.push(dose(2, "06:00")).unwrap();
        queue.push(dose(3, "07:00")).unwrap();

        assert_eq!(queue.remove_by_id(1).unwrap().id, 1);
        assert_eq!(queue.peek_min().unwrap().id, 2);
        assert_eq!(queue.remove_by_id(3).unwrap().id, 3);
        assert_eq!(queue.len(), 1);
        assert!(queue.is_heap_ordered());
    }

    #[test]
    fn test_oversized_capacity_is_allocation_failure() {
        assert!(matches!(
            ScheduleQueue::try_with_capacity(usize::MAX),
            Err(Error::AllocationFailure(_))
        ));
    }
}
