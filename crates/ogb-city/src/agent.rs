//! Mobile agents carrying resources between units.

use std::sync::Arc;

use ogb_core::{AgentId, NodeId, PathId, ResourceBag, TICKS_PER_SECOND, UnitId, Vec3, WayId};
use ogb_rules::AgentType;
use ogb_spatial::Path;

/// Outcome of one traversal step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum AgentStep {
    Moving,
    /// The last leg completed; deliver and destroy.
    Arrived,
    /// The agent has no route (no reachable target at spawn time).
    Stranded,
}

/// A mobile entity traversing a precomputed route along one path graph.
///
/// `nodes` and `ways` come from the spawn-time nearest-target search:
/// `ways[i]` joins `nodes[i]` and `nodes[i + 1]`.  `leg` indexes the way
/// currently being traversed and `offset` is the distance covered along it,
/// always within `[0, way magnitude]`.
pub struct Agent {
    pub(crate) id: AgentId,
    pub(crate) ty: Arc<AgentType>,
    pub(crate) path: PathId,
    pub(crate) nodes: Vec<NodeId>,
    pub(crate) ways: Vec<WayId>,
    pub(crate) leg: usize,
    pub(crate) offset: f32,
    pub(crate) target_unit: UnitId,
    pub(crate) searched_target: String,
    pub(crate) payload: ResourceBag,
    pub(crate) done: bool,
}

impl Agent {
    pub(crate) fn with_route(
        id: AgentId,
        ty: Arc<AgentType>,
        path: PathId,
        nodes: Vec<NodeId>,
        ways: Vec<WayId>,
        target_unit: UnitId,
        searched_target: &str,
        payload: ResourceBag,
    ) -> Self {
        Self {
            id,
            ty,
            path,
            nodes,
            ways,
            leg: 0,
            offset: 0.0,
            target_unit,
            searched_target: searched_target.to_owned(),
            payload,
            done: false,
        }
    }

    /// An agent spawned without a reachable target.  It is destroyed (with a
    /// warning) on its first update, so add/remove callbacks pair up.
    pub(crate) fn stranded(
        id: AgentId,
        ty: Arc<AgentType>,
        path: PathId,
        at: NodeId,
        searched_target: &str,
        payload: ResourceBag,
    ) -> Self {
        Self {
            id,
            ty,
            path,
            nodes: vec![at],
            ways: Vec::new(),
            leg: 0,
            offset: 0.0,
            target_unit: UnitId::INVALID,
            searched_target: searched_target.to_owned(),
            payload,
            done: false,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn ty(&self) -> &Arc<AgentType> {
        &self.ty
    }

    pub fn path(&self) -> PathId {
        self.path
    }

    pub fn target_unit(&self) -> UnitId {
        self.target_unit
    }

    pub fn searched_target(&self) -> &str {
        &self.searched_target
    }

    pub fn payload(&self) -> &ResourceBag {
        &self.payload
    }

    /// Distance covered along the current leg.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The way currently being traversed, if the agent has a route.
    pub fn current_way(&self) -> Option<WayId> {
        self.ways.get(self.leg).copied()
    }

    /// Interpolated world position.
    pub fn position(&self, path: &Path) -> Vec3 {
        if self.ways.is_empty() {
            return path.node(self.nodes[0]).position();
        }
        let magnitude = path.way_magnitude(self.ways[self.leg]);
        let t = if magnitude > 0.0 { (self.offset / magnitude).min(1.0) } else { 1.0 };
        Vec3::lerp(
            path.node(self.nodes[self.leg]).position(),
            path.node(self.nodes[self.leg + 1]).position(),
            t,
        )
    }

    /// Advance one tick's worth of distance, carrying remainder across legs.
    pub(crate) fn advance(&mut self, path: &Path) -> AgentStep {
        if self.ways.is_empty() {
            return AgentStep::Stranded;
        }
        // Divide by the tick rate rather than multiplying by the rounded
        // interval so whole-number speeds step by exact distances.
        self.offset += self.ty.speed / TICKS_PER_SECOND as f32;
        loop {
            let magnitude = path.way_magnitude(self.ways[self.leg]);
            if self.offset < magnitude {
                return AgentStep::Moving;
            }
            if self.leg + 1 == self.ways.len() {
                self.offset = magnitude;
                return AgentStep::Arrived;
            }
            self.offset -= magnitude;
            self.leg += 1;
        }
    }
}
