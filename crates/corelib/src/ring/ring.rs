//! Consistent hash ring: sorted positions plus a member set, guarded the way
//! §5 of the workspace root SPEC_FULL.md requires (readers take a shared
//! lock, writers take exclusive; no torn reads of a half-added node's
//! vnodes).

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::node::{Node, NodeId};
use crate::token::Token;
use crate::vnode::VirtualNode;

/// Default vnode count per physical node (§3).
pub const DEFAULT_VNODES: usize = 100;

struct RingInner {
    vnodes_per_node: usize,
    /// Sorted ascending by token; collisions are resolved by rejecting the
    /// later insert (§4.1).
    positions: RwLock<Vec<(Token, NodeId)>>,
    members: RwLock<HashSet<NodeId>>,
    registry: DashMap<NodeId, Node>,
}

/// The consistent hash ring (component B). Cheap to clone — every clone
/// shares the same underlying state via `Arc`.
#[derive(Clone)]
pub struct HashRing {
    inner: Arc<RingInner>,
}

/// Alias used by dependents that just want "the ring type".
pub type Ring = HashRing;

impl HashRing {
    /// A ring using the default vnode count (`V = 100`).
    pub fn new() -> Self {
        Self::with_vnodes(DEFAULT_VNODES)
    }

    /// A ring where every node added contributes `vnodes` positions.
    pub fn with_vnodes(vnodes: usize) -> Self {
        Self {
            inner: Arc::new(RingInner {
                vnodes_per_node: vnodes.max(1),
                positions: RwLock::new(Vec::new()),
                members: RwLock::new(HashSet::new()),
                registry: DashMap::new(),
            }),
        }
    }

    /// Adds `node`'s `V` vnodes to the ring. A no-op if `node` is already a
    /// member (idempotent against a monitor that fires `add_node` twice for
    /// the same recovery).
    pub fn add_node(&self, node: Node) {
        let mut members = self.inner.members.write();
        if members.contains(&node.id) {
            return;
        }

        let mut positions = self.inner.positions.write();
        for i in 0..self.inner.vnodes_per_node {
            let vn = VirtualNode::from_index(&node.id, i);
            if let Err(idx) = positions.binary_search_by_key(&vn.token, |(t, _)| *t) {
                positions.insert(idx, (vn.token, vn.node_id));
            }
            // Ok(_): collision, astronomically unlikely with MD5; reject
            // the later insert per §4.1.
        }

        members.insert(node.id.clone());
        self.inner.registry.insert(node.id.clone(), node);
    }

    /// Removes every position tagged with `id`. Returns whether `id` was a
    /// member.
    pub fn remove_node(&self, id: &NodeId) -> bool {
        let mut members = self.inner.members.write();
        if !members.remove(id) {
            return false;
        }
        let mut positions = self.inner.positions.write();
        positions.retain(|(_, owner)| owner != id);
        self.inner.registry.remove(id);
        true
    }

    /// Index of the first vnode at or after `token`, wrapping to `0`.
    fn clockwise_start(positions: &[(Token, NodeId)], token: Token) -> usize {
        let n = positions.len();
        let idx = match positions.binary_search_by_key(&token, |(t, _)| *t) {
            Ok(i) => i,
            Err(i) => i,
        };
        idx % n
    }

    /// Owner of the first vnode at or after `H(key)`, wrapping at the end.
    /// `None` iff the ring has no members.
    pub fn get_node(&self, key: &str) -> Option<NodeId> {
        let positions = self.inner.positions.read();
        if positions.is_empty() {
            return None;
        }
        let start = Self::clockwise_start(&positions, Token::of(key));
        Some(positions[start].1.clone())
    }

    /// Distinct, ordered replica list for `key`: walks clockwise from
    /// `H(key)`, skipping nodes already collected, until `r` distinct
    /// members are gathered or every position has been visited. The first
    /// element always equals `get_node(key)` (§4.1).
    pub fn get_replicas(&self, key: &str, r: usize) -> Vec<NodeId> {
        let positions = self.inner.positions.read();
        if positions.is_empty() || r == 0 {
            return Vec::new();
        }
        let member_count = self.inner.members.read().len();
        let target = r.min(member_count);

        let n = positions.len();
        let start = Self::clockwise_start(&positions, Token::of(key));

        let mut replicas = Vec::with_capacity(target);
        let mut seen = HashSet::with_capacity(target);
        for step in 0..n {
            let (_, node_id) = &positions[(start + step) % n];
            if seen.insert(node_id.clone()) {
                replicas.push(node_id.clone());
                if replicas.len() == target {
                    break;
                }
            }
        }
        replicas
    }

    /// Nodes currently considered members, in no particular order.
    pub fn nodes(&self) -> Vec<Node> {
        self.inner
            .registry
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// NodeIds currently considered members.
    pub fn members(&self) -> HashSet<NodeId> {
        self.inner.members.read().clone()
    }

    /// Metadata for a single member, if present.
    pub fn get_node_info(&self, id: &NodeId) -> Option<Node> {
        self.inner.registry.get(id).map(|e| e.value().clone())
    }

    /// All `(token, owner)` pairs, sorted ascending by token.
    pub fn tokens(&self) -> Vec<(Token, NodeId)> {
        self.inner.positions.read().clone()
    }

    pub fn node_count(&self) -> usize {
        self.inner.members.read().len()
    }

    pub fn token_count(&self) -> usize {
        self.inner.positions.read().len()
    }

    pub fn vnodes_per_node(&self) -> usize {
        self.inner.vnodes_per_node
    }

    /// Name of the placement hash, for topology reporting.
    pub fn partitioner_name(&self) -> &'static str {
        "Md5Partitioner"
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent construction of a ring, mirroring `HashRing::new` plus a batch of
/// `add_node` calls.
pub struct RingBuilder {
    vnodes: usize,
    nodes: Vec<Node>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self {
            vnodes: DEFAULT_VNODES,
            nodes: Vec::new(),
        }
    }

    /// Sets the vnode count used for every node added through this builder.
    pub fn with_vnodes(mut self, vnodes: usize) -> Self {
        self.vnodes = vnodes;
        self
    }

    pub fn add_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn build(self) -> HashRing {
        let ring = HashRing::with_vnodes(self.vnodes);
        for node in self.nodes {
            ring.add_node(node);
        }
        ring
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
