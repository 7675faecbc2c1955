//! Predicate-terminated Dijkstra over a path graph.
//!
//! Agent navigation does not know its destination node up front: it searches
//! for the *nearest* node that satisfies a caller-supplied predicate (a node
//! hosting a unit that accepts the agent's target and payload).  The search
//! therefore terminates as soon as an accepted node is popped from the heap,
//! which by Dijkstra's invariant is the nearest one.
//!
//! # Determinism
//!
//! Heap entries are ordered by `(cost, node_id)` with `f32::total_cmp`, so
//! equal-cost frontiers pop in ascending node-id order and repeated searches
//! over the same graph always return the same route.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ogb_core::{NodeId, WayId};

use crate::path::Path;

// ── SearchResult ──────────────────────────────────────────────────────────────

/// The result of a nearest-accepting search.
///
/// `ways[i]` joins `nodes[i]` and `nodes[i + 1]`; a trivial result (the start
/// node itself was accepted) has one node and no ways.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub nodes: Vec<NodeId>,
    pub ways: Vec<WayId>,
    /// Summed way magnitudes along the route.
    pub cost: f32,
}

// ── Heap entry ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone)]
struct QueueEntry {
    cost: f32,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // total_cmp: costs are finite sums of magnitudes, NaN never enters.
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Find the nearest node (by summed way magnitude) for which `accept`
/// returns `true`, starting from `start`.
///
/// Ways are traversed in both directions.  Returns `None` if no reachable
/// node is accepted (including when the graph component of `start` is
/// exhausted).  An accepted `start` yields a trivial single-node result.
pub fn nearest_accepting<F>(path: &Path, start: NodeId, mut accept: F) -> Option<SearchResult>
where
    F: FnMut(NodeId) -> bool,
{
    let n = path.node_count();
    if start.index() >= n {
        return None;
    }

    // dist[v] = best known cost to reach v; prev[v] = predecessor node.
    let mut dist = vec![f32::INFINITY; n];
    let mut prev = vec![NodeId::INVALID; n];
    dist[start.index()] = 0.0;

    // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap = BinaryHeap::new();
    heap.push(Reverse(QueueEntry { cost: 0.0, node: start }));

    while let Some(Reverse(QueueEntry { cost, node })) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        if accept(node) {
            return Some(reconstruct(path, &prev, start, node, cost));
        }

        for &way in path.node(node).ways() {
            let neighbor = path.way(way).opposite(node);
            let new_cost = cost + path.way_magnitude(way);
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Reverse(QueueEntry { cost: new_cost, node: neighbor }));
            }
        }
    }

    None
}

/// Walk the predecessor chain back to `start`, then pick the way joining
/// each consecutive node pair (minimum magnitude, ties by lower way id).
fn reconstruct(
    path: &Path,
    prev: &[NodeId],
    start: NodeId,
    goal: NodeId,
    cost: f32,
) -> SearchResult {
    let mut nodes = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = prev[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();

    let ways = nodes
        .windows(2)
        .map(|pair| joining_way(path, pair[0], pair[1]))
        .collect();

    SearchResult { nodes, ways, cost }
}

fn joining_way(path: &Path, a: NodeId, b: NodeId) -> WayId {
    path.node(a)
        .ways()
        .iter()
        .copied()
        .filter(|&w| path.way(w).opposite(a) == b)
        .min_by(|&x, &y| {
            path.way_magnitude(x)
                .total_cmp(&path.way_magnitude(y))
                .then_with(|| x.cmp(&y))
        })
        .expect("predecessor chain implies a joining way")
}
