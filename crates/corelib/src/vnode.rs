//! Virtual node abstractions.
//!
//! Each physical node contributes `V` virtual nodes to the ring, smoothing
//! load distribution across a small roster (§3/§4.1 of the workspace root
//! SPEC_FULL.md). A vnode is just `(token, owning node)`; the ring stores
//! them sorted by token and walks them clockwise to place keys and replicas.

use crate::node::NodeId;
use crate::token::Token;

/// One ring position contributed by a physical node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VirtualNode {
    pub token: Token,
    pub node_id: NodeId,
}

impl VirtualNode {
    pub fn new(token: Token, node_id: NodeId) -> Self {
        Self { token, node_id }
    }

    /// Derives vnode `i` for `node_id` from `H(node_id || "-vn" || i)`.
    pub fn from_index(node_id: &NodeId, index: usize) -> Self {
        let key = format!("{node_id}-vn{index}");
        Self::new(Token::of(&key), node_id.clone())
    }
}

impl std::fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VNode({}, {})", self.token, self.node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_indices_give_distinct_tokens() {
        let id = NodeId::from("node1");
        let v0 = VirtualNode::from_index(&id, 0);
        let v1 = VirtualNode::from_index(&id, 1);
        assert_ne!(v0.token, v1.token);
        assert_eq!(v0.node_id, v1.node_id);
    }

    #[test]
    fn deterministic_across_construction() {
        let id = NodeId::from("node1");
        assert_eq!(
            VirtualNode::from_index(&id, 7).token,
            VirtualNode::from_index(&id, 7).token
        );
    }
}
