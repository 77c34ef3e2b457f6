use crate::foundation::error::{CanvasAnimError, CanvasAnimResult};

/// Position of a value inside a [`SlotPool`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SlotIndex(pub u32);

impl SlotIndex {
    pub(crate) fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Fixed-capacity storage with per-slot occupancy.
///
/// Storage is sized once in [`SlotPool::new`] and never grows. Allocation always takes the lowest
/// free index, so a freed slot is the first one handed out again.
#[derive(Debug)]
pub struct SlotPool<T> {
    name: &'static str,
    slots: Vec<Option<T>>,
    occupied: usize,
}

impl<T> SlotPool<T> {
    /// Create an empty pool holding at most `capacity` values.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            name,
            slots,
            occupied: 0,
        }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Return `true` when no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Return `true` when every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Return `true` when `idx` is in range and holds a value.
    pub fn is_occupied(&self, idx: SlotIndex) -> bool {
        self.get(idx).is_some()
    }

    fn lowest_free(&self) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        self.slots.iter().position(Option::is_none)
    }

    /// Store `value` in the lowest free slot, or hand it back when the pool is full.
    pub fn allocate(&mut self, value: T) -> Result<SlotIndex, T> {
        let Some(i) = self.lowest_free() else {
            return Err(value);
        };
        self.slots[i] = Some(value);
        self.occupied += 1;
        Ok(SlotIndex(i as u32))
    }

    /// Like [`SlotPool::allocate`], reporting a full pool as [`CanvasAnimError::PoolExhausted`].
    pub fn try_allocate(&mut self, value: T) -> CanvasAnimResult<SlotIndex> {
        self.allocate(value)
            .map_err(|_| CanvasAnimError::pool_exhausted(self.name, self.capacity()))
    }

    /// Value at `idx`, if occupied.
    pub fn get(&self, idx: SlotIndex) -> Option<&T> {
        self.slots.get(idx.as_usize()).and_then(Option::as_ref)
    }

    /// Mutable value at `idx`, if occupied.
    pub fn get_mut(&mut self, idx: SlotIndex) -> Option<&mut T> {
        self.slots.get_mut(idx.as_usize()).and_then(Option::as_mut)
    }

    /// Value at `idx`, or a descriptor error naming this pool.
    pub(crate) fn expect_slot(&self, idx: SlotIndex) -> CanvasAnimResult<&T> {
        self.get(idx).ok_or_else(|| {
            CanvasAnimError::descriptor(format!("{} slot {} is not occupied", self.name, idx.0))
        })
    }

    /// Release `idx`, returning the value it held.
    pub fn free(&mut self, idx: SlotIndex) -> Option<T> {
        let taken = self.slots.get_mut(idx.as_usize()).and_then(Option::take);
        if taken.is_some() {
            self.occupied -= 1;
        }
        taken
    }

    /// Release every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.occupied = 0;
    }

    /// Occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (SlotIndex(i as u32), v)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pool/slot_pool.rs"]
mod tests;
