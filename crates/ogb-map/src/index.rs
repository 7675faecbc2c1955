//! Insertion-ordered map registry.

use std::collections::HashMap;

use ogb_core::MapId;

use crate::map::Map;

/// The maps owned by one city, iterated in insertion order and addressable
/// by name.
///
/// Insertion order is part of the engine's determinism contract, so the
/// backing store is a `Vec` with a name → id side index rather than a map
/// keyed by name.
#[derive(Default)]
pub struct MapIndex {
    maps: Vec<Map>,
    by_name: HashMap<String, MapId>,
}

impl MapIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Register a new map.  Returns `None` if the name is already taken.
    pub fn add(&mut self, name: &str, capacity: u32, dim_u: u32, dim_v: u32) -> Option<MapId> {
        if self.contains(name) {
            return None;
        }
        let id = MapId(self.maps.len() as u32);
        self.maps.push(Map::new(id, name, capacity, dim_u, dim_v));
        self.by_name.insert(name.to_owned(), id);
        Some(id)
    }

    pub fn id_of(&self, name: &str) -> Option<MapId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: MapId) -> Option<&Map> {
        self.maps.get(id.index())
    }

    pub fn get_mut(&mut self, id: MapId) -> Option<&mut Map> {
        self.maps.get_mut(id.index())
    }

    pub fn by_name(&self, name: &str) -> Option<&Map> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Map> {
        let id = self.id_of(name)?;
        self.get_mut(id)
    }

    /// Iterate maps in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Map> {
        self.maps.iter()
    }
}
