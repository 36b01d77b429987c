//! Slot storage: a fixed-capacity array of typed slots.
//!
//! A slot is either empty or holds one entry together with its displacement
//! (distance from the entry's home index). There is no third "deleted" state;
//! the table repairs probe chains on removal instead of leaving markers.

use crate::error::Error;
use crate::Value;

#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) key: Box<str>,
    pub(crate) value: Value,
    pub(crate) displacement: usize,
}

impl Entry {
    pub(crate) fn new(key: Box<str>, value: Value) -> Self {
        Entry {
            key,
            value,
            displacement: 0,
        }
    }
}

/// Read-only view of an occupied slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotView<'a> {
    pub key: &'a str,
    pub value: Value,
    /// Probe sequence length: slots between the home index and this one.
    pub displacement: usize,
}

impl<'a> From<&'a Entry> for SlotView<'a> {
    fn from(e: &'a Entry) -> Self {
        SlotView {
            key: &e.key,
            value: e.value,
            displacement: e.displacement,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Slots {
    slots: Vec<Option<Entry>>,
}

impl Slots {
    /// Allocate `capacity` empty slots, reporting allocation failure
    /// instead of aborting.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|source| Error::AllocationFailed {
                slots: capacity,
                source,
            })?;
        slots.resize_with(capacity, || None);
        Ok(Slots { slots })
    }

    /// Allocate `capacity` empty slots; aborts on allocation failure.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Slots {
            slots: (0..capacity).map(|_| None).collect(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() {
            0
        } else {
            next
        }
    }

    #[inline]
    pub(crate) fn is_occupied(&self, index: usize) -> bool {
        self.slots[index].is_some()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&Entry> {
        self.slots[index].as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.slots[index].as_mut()
    }

    /// Value of an occupied slot. Panics if the slot is empty.
    #[inline]
    pub(crate) fn value_mut(&mut self, index: usize) -> &mut Value {
        match &mut self.slots[index] {
            Some(e) => &mut e.value,
            None => panic!("slot {index} is empty"),
        }
    }

    /// Store `entry` in an empty slot.
    #[inline]
    pub(crate) fn place(&mut self, index: usize, entry: Entry) {
        debug_assert!(!self.is_occupied(index), "placing into occupied slot {index}");
        self.slots[index] = Some(entry);
    }

    /// Empty a slot and hand back its entry.
    #[inline]
    pub(crate) fn take(&mut self, index: usize) -> Option<Entry> {
        self.slots[index].take()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    pub(crate) fn iter(&self) -> core::slice::Iter<'_, Option<Entry>> {
        self.slots.iter()
    }

    /// Consume the storage, yielding every live entry.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = Entry> {
        self.slots.into_iter().flatten()
    }
}
