//! Path graph: nodes, ways, and way splitting.
//!
//! # Data layout
//!
//! A [`Path`] owns two arenas, `Vec<Node>` and `Vec<Way>`, addressed by
//! `NodeId`/`WayId` (sequential from 0, never reused).  Each node keeps the
//! id list of its incident ways and of the units attached to it, so both
//! graph traversal and target lookup are index chases with no allocation.
//!
//! Ways are stored with `from`/`to` endpoints but are traversable in both
//! directions; the orientation only matters for split parameters and
//! position interpolation.

use std::sync::Arc;

use ogb_core::{NodeId, UnitId, Vec3, WayId};

use crate::{SpatialError, SpatialResult};

// ── Display metadata ──────────────────────────────────────────────────────────

/// Display metadata for a named path graph (e.g. "Road").
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathType {
    pub name: String,
    pub color: ogb_core::Color,
}

/// Display metadata for a way kind (e.g. "Dirt", "Asphalt").
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayType {
    pub name: String,
    pub color: ogb_core::Color,
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// A vertex of the path graph.  Units attach here; agents travel between
/// nodes along ways.
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    position: Vec3,
    ways: Vec<WayId>,
    units: Vec<UnitId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Ids of all incident ways, in attachment order.
    pub fn ways(&self) -> &[WayId] {
        &self.ways
    }

    /// Ids of all units attached to this node, in attachment order.
    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    #[inline]
    pub fn has_ways(&self) -> bool {
        !self.ways.is_empty()
    }
}

// ── Way ───────────────────────────────────────────────────────────────────────

/// An edge of the path graph.
#[derive(Clone, Debug)]
pub struct Way {
    id: WayId,
    ty: Arc<WayType>,
    from: NodeId,
    to: NodeId,
}

impl Way {
    pub fn id(&self) -> WayId {
        self.id
    }

    pub fn ty(&self) -> &Arc<WayType> {
        &self.ty
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    /// The endpoint opposite `node`.
    ///
    /// Callers must pass one of the way's endpoints.
    #[inline]
    pub fn opposite(&self, node: NodeId) -> NodeId {
        debug_assert!(node == self.from || node == self.to);
        if node == self.from { self.to } else { self.from }
    }

    /// `true` if `node` is one of the way's endpoints.
    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        node == self.from || node == self.to
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// A named subgraph of nodes and ways within a city.
pub struct Path {
    ty: Arc<PathType>,
    nodes: Vec<Node>,
    ways: Vec<Way>,
}

impl Path {
    pub fn new(ty: Arc<PathType>) -> Self {
        Self { ty, nodes: Vec::new(), ways: Vec::new() }
    }

    pub fn ty(&self) -> &Arc<PathType> {
        &self.ty
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    /// Direct node access.  Ids handed out by this path are always valid.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn way(&self, id: WayId) -> &Way {
        &self.ways[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.ways.iter()
    }

    /// Euclidean length of a way.
    #[inline]
    pub fn way_magnitude(&self, id: WayId) -> f32 {
        let way = &self.ways[id.index()];
        self.nodes[way.from.index()]
            .position
            .distance(self.nodes[way.to.index()].position)
    }

    /// World position at fractional parameter `t` along a way (0 = `from`).
    pub fn position_along(&self, id: WayId, t: f32) -> Vec3 {
        let way = &self.ways[id.index()];
        Vec3::lerp(
            self.nodes[way.from.index()].position,
            self.nodes[way.to.index()].position,
            t,
        )
    }

    /// Add a node at `position` and return its id.
    pub fn add_node(&mut self, position: Vec3) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { id, position, ways: Vec::new(), units: Vec::new() });
        id
    }

    /// Add a way joining `a` and `b`.
    ///
    /// Self-loops are rejected; parallel ways between the same endpoints are
    /// allowed (route reconstruction picks the shortest).
    pub fn add_way(&mut self, ty: Arc<WayType>, a: NodeId, b: NodeId) -> SpatialResult<WayId> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(SpatialError::SelfLoop(a));
        }
        let id = WayId(self.ways.len() as u32);
        self.ways.push(Way { id, ty, from: a, to: b });
        self.nodes[a.index()].ways.push(id);
        self.nodes[b.index()].ways.push(id);
        Ok(id)
    }

    /// Split `way` at fractional parameter `t ∈ (0, 1)`, returning the id of
    /// the inserted node.
    ///
    /// The original way is re-wired to cover `from → new`; a fresh way of the
    /// same type covers `new → to`.  The far endpoint's incident-way list is
    /// updated in place, so references held by other entities stay valid.
    /// `t` of exactly 0 or 1 is rejected — use the endpoint node instead.
    pub fn split_way(&mut self, way: WayId, t: f32) -> SpatialResult<NodeId> {
        self.check_way(way)?;
        if !(t > 0.0 && t < 1.0) {
            return Err(SpatialError::InvalidSplit(t));
        }

        let (from, to) = {
            let w = &self.ways[way.index()];
            (w.from, w.to)
        };
        let position = Vec3::lerp(
            self.nodes[from.index()].position,
            self.nodes[to.index()].position,
            t,
        );
        let mid = self.add_node(position);

        let second = WayId(self.ways.len() as u32);
        let ty = Arc::clone(self.ways[way.index()].ty());
        self.ways[way.index()].to = mid;
        self.ways.push(Way { id: second, ty, from: mid, to });

        self.nodes[mid.index()].ways.extend([way, second]);
        for w in &mut self.nodes[to.index()].ways {
            if *w == way {
                *w = second;
            }
        }
        Ok(mid)
    }

    /// Register a unit as attached to `node`.
    pub fn attach_unit(&mut self, node: NodeId, unit: UnitId) -> SpatialResult<()> {
        self.check_node(node)?;
        self.nodes[node.index()].units.push(unit);
        Ok(())
    }

    fn check_node(&self, id: NodeId) -> SpatialResult<()> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(SpatialError::NodeNotFound(id))
        }
    }

    fn check_way(&self, id: WayId) -> SpatialResult<()> {
        if id.index() < self.ways.len() {
            Ok(())
        } else {
            Err(SpatialError::WayNotFound(id))
        }
    }
}
