//! RobinMap: open-addressing table with Robin Hood placement and
//! backward-shift deletion.

use crate::error::Error;
use crate::hasher::{self, home_index};
use crate::slots::{Entry, SlotView, Slots};
use crate::Value;
use core::fmt;

/// Smallest capacity accepted by [`RobinMap::with_capacity`].
pub const MIN_CAPACITY: usize = 5;
/// Capacity used by [`RobinMap::new`].
pub const DEFAULT_CAPACITY: usize = 47;
/// Load factor that an insertion of a new key is never allowed to reach.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

// MAX_LOAD_FACTOR as an exact ratio.
const LOAD_NUMERATOR: usize = 7;
const LOAD_DENOMINATOR: usize = 10;
const GROWTH_FACTOR: usize = 2;

/// String-keyed, integer-valued hash table.
///
/// Every occupied slot records its displacement from the key's home index.
/// Insertion lets an entry that has travelled further take the slot of a
/// resident that has travelled less; removal shifts the rest of the probe
/// chain back by one slot, so no deleted markers are ever left behind.
///
/// Keys are copied into the table on insertion and dropped on removal or
/// when the table is dropped.
pub struct RobinMap {
    slots: Slots,
    len: usize,
}

impl RobinMap {
    /// Table with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        tracing::trace!(capacity = DEFAULT_CAPACITY, "created table");
        RobinMap {
            slots: Slots::with_capacity(DEFAULT_CAPACITY),
            len: 0,
        }
    }

    /// Table with `capacity` slots; `capacity` must be at least
    /// [`MIN_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity < MIN_CAPACITY {
            return Err(Error::CapacityTooSmall {
                requested: capacity,
                minimum: MIN_CAPACITY,
            });
        }
        let slots = Slots::try_with_capacity(capacity)?;
        tracing::trace!(capacity, "created table");
        Ok(RobinMap { slots, len: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Slot `key` would occupy if nothing collided with it.
    pub fn home_index(&self, key: &str) -> usize {
        home_index(hasher::hash(key), self.capacity())
    }

    /// Index of the slot holding `key`.
    ///
    /// Stops at the first empty slot, or at the first resident whose
    /// displacement is smaller than the current probe length: had `key`
    /// been stored further on, insertion would have claimed that slot.
    fn find_index(&self, key: &str) -> Option<usize> {
        let mut index = self.home_index(key);
        let mut probe = 0usize;
        loop {
            let entry = self.slots.get(index)?;
            if entry.displacement < probe {
                return None;
            }
            if &*entry.key == key {
                return Some(index);
            }
            probe += 1;
            index = self.slots.next_index(index);
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.find_index(key)
            .and_then(|i| self.slots.get(i))
            .map(|e| e.value)
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let index = self.find_index(key)?;
        Some(self.slots.value_mut(index))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Insert `key` or overwrite its value, returning the stored value.
    ///
    /// Overwriting never changes `len` or any displacement. Inserting a new
    /// key first doubles the capacity if the new entry would bring the load
    /// factor to [`MAX_LOAD_FACTOR`].
    ///
    /// The returned reference borrows the table, so it cannot be held across
    /// a later call that might move entries around.
    ///
    /// # Errors
    /// [`Error::EmptyKey`] for `""`; [`Error::AllocationFailed`] or
    /// [`Error::CapacityOverflow`] if growth is needed and fails. On error
    /// the table is unchanged.
    pub fn put(&mut self, key: &str, value: Value) -> Result<&mut Value, Error> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        if let Some(index) = self.find_index(key) {
            let stored = self.slots.value_mut(index);
            *stored = value;
            return Ok(stored);
        }

        if self.needs_growth() {
            self.grow()?;
        }
        let index = place(&mut self.slots, Entry::new(key.into(), value));
        self.len += 1;
        Ok(self.slots.value_mut(index))
    }

    /// Remove `key`, returning the value it held.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.find_index(key)?;
        let removed = self.slots.take(index)?;
        self.len -= 1;
        self.shift_back(index);
        Some(removed.value)
    }

    /// Remove every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.slots.iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Every slot in index order; `None` for empty slots.
    pub fn slots(&self) -> impl ExactSizeIterator<Item = Option<SlotView<'_>>> + '_ {
        self.slots.iter().map(|s| s.as_ref().map(SlotView::from))
    }

    fn needs_growth(&self) -> bool {
        (self.len + 1).saturating_mul(LOAD_DENOMINATOR)
            >= self.capacity().saturating_mul(LOAD_NUMERATOR)
    }

    /// Double the capacity and re-place every entry from its new home index.
    fn grow(&mut self) -> Result<(), Error> {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_mul(GROWTH_FACTOR)
            .ok_or(Error::CapacityOverflow {
                capacity: old_capacity,
            })?;
        let fresh = Slots::try_with_capacity(new_capacity)?;

        let old = core::mem::replace(&mut self.slots, fresh);
        for entry in old.into_entries() {
            place(&mut self.slots, entry);
        }
        tracing::debug!(old_capacity, new_capacity, len = self.len, "grew table");
        Ok(())
    }

    /// Close the hole at `gap` by pulling displaced successors back one slot.
    fn shift_back(&mut self, mut gap: usize) {
        loop {
            let next = self.slots.next_index(gap);
            match self.slots.get(next) {
                Some(e) if e.displacement > 0 => {}
                _ => return,
            }
            if let Some(mut moved) = self.slots.take(next) {
                moved.displacement -= 1;
                self.slots.place(gap, moved);
            }
            gap = next;
        }
    }

    /// Panics unless every occupied slot's displacement matches its distance
    /// from home, keys are unique, and `len` matches the occupied count.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.capacity();
        let mut seen = std::collections::BTreeSet::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(e) = slot else { continue };
            let home = home_index(hasher::hash(&e.key), capacity);
            assert_eq!(
                e.displacement,
                (index + capacity - home) % capacity,
                "wrong displacement for {:?} at slot {index}",
                e.key
            );
            assert!(!e.key.is_empty(), "empty key stored at slot {index}");
            assert!(seen.insert(&*e.key), "duplicate key {:?}", e.key);
        }
        assert_eq!(seen.len(), self.len, "len out of sync with occupied slots");
        assert!(
            self.len * LOAD_DENOMINATOR < capacity * LOAD_NUMERATOR,
            "load factor {} reached the growth threshold",
            self.load_factor()
        );
    }
}

/// Robin Hood placement of an entry whose key is not in `slots`.
///
/// Walks from the entry's home index. Whenever the resident has a smaller
/// displacement than the travelling entry, the two swap and the former
/// resident travels on. Returns the index where `entry` itself settled.
fn place(slots: &mut Slots, mut traveling: Entry) -> usize {
    traveling.displacement = 0;
    let mut index = home_index(hasher::hash(&traveling.key), slots.capacity());
    let mut settled = None;
    loop {
        match slots.get_mut(index) {
            None => {
                slots.place(index, traveling);
                return settled.unwrap_or(index);
            }
            Some(resident) => {
                debug_assert!(resident.key != traveling.key, "key placed twice");
                if resident.displacement < traveling.displacement {
                    core::mem::swap(resident, &mut traveling);
                    settled.get_or_insert(index);
                }
            }
        }
        traveling.displacement += 1;
        index = slots.next_index(index);
    }
}

impl Default for RobinMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RobinMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(key, value)` pairs in slot order.
pub struct Iter<'a> {
    it: core::slice::Iter<'a, Option<Entry>>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.it.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some((&e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RobinMap {
    type Item = (&'a str, Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
