//! Stationary producer/consumer units.

use std::sync::Arc;

use ogb_core::{NodeId, PathId, ResourceBag, UnitId};
use ogb_rules::UnitType;

/// A stationary entity bound to exactly one node of one path graph.
///
/// Units own a resource bag initialized from their type's caps template and
/// starting amounts, and host that type's rules, fired by `City::update`.
pub struct Unit {
    pub(crate) id: UnitId,
    pub(crate) ty: Arc<UnitType>,
    pub(crate) path: PathId,
    pub(crate) node: NodeId,
    pub(crate) resources: ResourceBag,
    /// Per-unit tick counter driving rule rates.
    pub(crate) tick: u32,
}

impl Unit {
    pub(crate) fn new(id: UnitId, ty: Arc<UnitType>, path: PathId, node: NodeId) -> Self {
        let resources = ty.starting_bag();
        Self { id, ty, path, node, resources, tick: 0 }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn ty(&self) -> &Arc<UnitType> {
        &self.ty
    }

    pub fn path(&self) -> PathId {
        self.path
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn resources(&self) -> &ResourceBag {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceBag {
        &mut self.resources
    }

    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    /// `true` if an agent searching for `target` with `payload` may deliver
    /// here: the target name is listed by this unit's type and the whole
    /// payload fits.
    pub fn accepts(&self, target: &str, payload: &ResourceBag) -> bool {
        self.ty.targets.iter().any(|t| t == target)
            && payload
                .iter()
                .all(|slot| self.resources.can_add(&slot.name, slot.amount))
    }
}
