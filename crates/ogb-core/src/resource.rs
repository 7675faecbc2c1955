//! Resource containers.
//!
//! A [`ResourceBag`] is an ordered multiset of named scalar quantities, each
//! clamped to a per-type capacity.  Bags back unit inventories, city-global
//! stockpiles, and agent payloads.
//!
//! # Semantics
//!
//! - `add` saturates at capacity and reports how much was actually stored.
//! - `remove` is all-or-nothing: it fails without side effects if the bag
//!   holds less than requested.
//! - `can_add` is strict: it requires room for the *entire* amount.  Rule
//!   validation and target matching use the strict check; payload delivery
//!   uses the saturating `add`.
//! - Type insertion order is preserved, so iteration is deterministic.

/// One resource type held in a bag: current amount plus the capacity ceiling.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceSlot {
    pub name: String,
    pub amount: u32,
    pub capacity: u32,
}

/// An insertion-ordered multiset of resources.
///
/// Lookup is a linear scan: bags hold a handful of types, so a `Vec` beats
/// any map structure and keeps iteration order equal to declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceBag {
    slots: Vec<ResourceSlot>,
}

impl ResourceBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of distinct resource types in the bag.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Iterate slots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceSlot> {
        self.slots.iter()
    }

    fn slot(&self, name: &str) -> Option<&ResourceSlot> {
        self.slots.iter().find(|s| s.name == name)
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut ResourceSlot> {
        self.slots.iter_mut().find(|s| s.name == name)
    }

    /// Declare a resource type with the given capacity.
    ///
    /// Re-declaring an existing type updates its capacity (clamping the
    /// current amount if the new capacity is lower).
    pub fn add_type(&mut self, name: &str, capacity: u32) {
        match self.slot_mut(name) {
            Some(slot) => {
                slot.capacity = capacity;
                slot.amount = slot.amount.min(capacity);
            }
            None => self.slots.push(ResourceSlot {
                name: name.to_owned(),
                amount: 0,
                capacity,
            }),
        }
    }

    /// Current amount of `name`, or 0 if the type is absent.
    pub fn get(&self, name: &str) -> u32 {
        self.slot(name).map_or(0, |s| s.amount)
    }

    /// Capacity of `name`.  Absent types report `u32::MAX` — the capacity
    /// they would receive if implicitly created by [`add`](Self::add).
    pub fn capacity(&self, name: &str) -> u32 {
        self.slot(name).map_or(u32::MAX, |s| s.capacity)
    }

    /// `true` if the whole of `n` fits without saturating.
    pub fn can_add(&self, name: &str, n: u32) -> bool {
        match self.slot(name) {
            Some(slot) => slot.amount.saturating_add(n) <= slot.capacity,
            None => true,
        }
    }

    /// `true` if at least `n` of `name` is held.
    pub fn can_remove(&self, name: &str, n: u32) -> bool {
        self.get(name) >= n
    }

    /// Add up to `n` of `name`, saturating at capacity.  Unknown types are
    /// implicitly declared with unlimited capacity.  Returns the amount
    /// actually stored.
    pub fn add(&mut self, name: &str, n: u32) -> u32 {
        let idx = match self.slots.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.slots.push(ResourceSlot {
                    name: name.to_owned(),
                    amount: 0,
                    capacity: u32::MAX,
                });
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[idx];
        let added = n.min(slot.capacity - slot.amount);
        slot.amount += added;
        added
    }

    /// Remove exactly `n` of `name`.  Fails (returning `false`, touching
    /// nothing) if less than `n` is held.
    pub fn remove(&mut self, name: &str, n: u32) -> bool {
        match self.slot_mut(name) {
            Some(slot) if slot.amount >= n => {
                slot.amount -= n;
                true
            }
            _ => false,
        }
    }

    /// Drain every resource in `self` into `dest` with saturating adds.
    ///
    /// Amounts that do not fit in `dest` are discarded; `self` is left with
    /// its types intact and all amounts at zero.
    pub fn transfer_to(&mut self, dest: &mut ResourceBag) {
        for slot in &mut self.slots {
            dest.add(&slot.name, slot.amount);
            slot.amount = 0;
        }
    }
}
