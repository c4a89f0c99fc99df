//! Ring tests: basic functionality plus the placement invariants of §8 in
//! the workspace root SPEC_FULL.md (replica count, distinctness,
//! order-preservation, add/remove round-trip, load dispersion).

use std::collections::HashSet;

use corelib::node::{Node, NodeId};
use corelib::ring::HashRing;

fn node(id: &str) -> Node {
    Node::new(id, "localhost", 0)
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn empty_ring_returns_none_and_no_replicas() {
    let ring = HashRing::new();
    assert_eq!(ring.get_node("key1"), None);
    assert!(ring.get_replicas("key1", 2).is_empty());
    assert_eq!(ring.node_count(), 0);
    assert_eq!(ring.token_count(), 0);
}

#[test]
fn add_node_and_lookup() {
    let ring = HashRing::with_vnodes(4);
    ring.add_node(node("node1"));

    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.token_count(), 4);

    let result = ring.get_node("test-key");
    assert_eq!(result, Some(NodeId::from("node1")));
    assert!(ring.get_node_info(&NodeId::from("node1")).is_some());
}

#[test]
fn remove_node_clears_its_vnodes() {
    let ring = HashRing::with_vnodes(4);
    ring.add_node(node("node1"));
    ring.add_node(node("node2"));
    assert_eq!(ring.node_count(), 2);
    assert_eq!(ring.token_count(), 8);

    assert!(ring.remove_node(&NodeId::from("node1")));
    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.token_count(), 4);
    assert_eq!(ring.get_node("some-key"), Some(NodeId::from("node2")));
    assert!(ring.get_node_info(&NodeId::from("node1")).is_none());

    assert!(!ring.remove_node(&NodeId::from("node1")));
}

#[test]
fn consistent_lookup() {
    let ring = HashRing::with_vnodes(4);
    ring.add_node(node("node1"));
    ring.add_node(node("node2"));

    let a = ring.get_node("consistent-key");
    let b = ring.get_node("consistent-key");
    assert_eq!(a, b);
}

#[test]
fn single_node_owns_everything() {
    let ring = HashRing::with_vnodes(4);
    ring.add_node(node("node1"));

    for key in ["key1", "key2", "key3", "a-much-longer-key-name"] {
        assert_eq!(ring.get_node(key), Some(NodeId::from("node1")));
    }
}

#[test]
fn readding_a_member_is_a_no_op() {
    let ring = HashRing::with_vnodes(4);
    ring.add_node(node("node1"));
    ring.add_node(node("node1"));
    assert_eq!(ring.token_count(), 4);
    assert_eq!(ring.node_count(), 1);
}

// ============================================================================
// §8 invariant 4 — add/remove round-trip
// ============================================================================

#[test]
fn add_then_remove_returns_ring_to_prior_state() {
    let ring = HashRing::with_vnodes(50);
    ring.add_node(node("node1"));
    ring.add_node(node("node2"));
    let before = ring.tokens();

    ring.add_node(node("node3"));
    ring.remove_node(&NodeId::from("node3"));

    assert_eq!(ring.tokens(), before);
    assert_eq!(ring.node_count(), 2);
}

#[test]
fn rejoin_reproduces_identical_vnode_positions() {
    let ring = HashRing::with_vnodes(50);
    ring.add_node(node("node1"));
    ring.add_node(node("node2"));
    ring.add_node(node("node3"));
    let before = ring.tokens();

    ring.remove_node(&NodeId::from("node3"));
    ring.add_node(node("node3"));

    assert_eq!(ring.tokens(), before);
}

// ============================================================================
// §8 invariants 1-3 — replica count, distinctness, order preservation
// ============================================================================

#[test]
fn replica_count_is_min_of_r_and_member_count() {
    let ring = HashRing::with_vnodes(100);
    for id in ["node1", "node2", "node3"] {
        ring.add_node(node(id));
    }

    for key in ["user:1", "user:2", "user:3", "user:4", "user:5"] {
        assert_eq!(ring.get_replicas(key, 2).len(), 2);
        assert_eq!(ring.get_replicas(key, 10).len(), 3); // capped at member count
    }
}

#[test]
fn replicas_are_pairwise_distinct() {
    let ring = HashRing::with_vnodes(100);
    for id in ["node1", "node2", "node3", "node4"] {
        ring.add_node(node(id));
    }

    for key in ["user:101", "order:7", "session:abc"] {
        let replicas = ring.get_replicas(key, 3);
        let unique: HashSet<_> = replicas.iter().collect();
        assert_eq!(unique.len(), replicas.len());
    }
}

#[test]
fn first_replica_is_the_primary_owner() {
    let ring = HashRing::with_vnodes(100);
    for id in ["node1", "node2", "node3", "node4"] {
        ring.add_node(node(id));
    }

    for key in ["user:101", "code", "dis"] {
        let primary = ring.get_node(key);
        let replicas = ring.get_replicas(key, 2);
        assert_eq!(Some(replicas[0].clone()), primary);
    }
}

// ============================================================================
// §8 invariant 5 — load dispersion
// ============================================================================

#[test]
fn load_disperses_within_a_2x_ratio_across_4_members() {
    let ring = HashRing::with_vnodes(100);
    for id in ["node1", "node2", "node3", "node4"] {
        ring.add_node(node(id));
    }

    let mut counts: std::collections::HashMap<NodeId, usize> = std::collections::HashMap::new();
    for i in 0..10_000 {
        let key = format!("key-{i}");
        let owner = ring.get_node(&key).unwrap();
        *counts.entry(owner).or_insert(0) += 1;
    }

    let max = *counts.values().max().unwrap();
    let min = *counts.values().min().unwrap();
    assert!(
        (max as f64) / (min as f64) <= 2.0,
        "dispersion ratio {}/{} exceeds 2.0",
        max,
        min
    );
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn ring_builder_default_vnodes() {
    let ring = corelib::ring::RingBuilder::new()
        .add_node(node("node1"))
        .add_node(node("node2"))
        .build();

    assert!(ring.get_node("key").is_some());
    assert_eq!(ring.node_count(), 2);
    assert_eq!(ring.token_count(), 200); // 2 nodes * default 100 vnodes
}

#[test]
fn ring_builder_custom_vnodes() {
    let ring = corelib::ring::RingBuilder::new()
        .with_vnodes(8)
        .add_node(node("node1"))
        .add_node(node("node2"))
        .build();

    assert_eq!(ring.node_count(), 2);
    assert_eq!(ring.token_count(), 16);
}

// ============================================================================
// Utility
// ============================================================================

#[test]
fn nodes_lists_every_member() {
    let ring = HashRing::with_vnodes(4);
    ring.add_node(node("node1"));
    ring.add_node(node("node2"));

    let ids: HashSet<NodeId> = ring.nodes().into_iter().map(|n| n.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&NodeId::from("node1")));
    assert!(ids.contains(&NodeId::from("node2")));
}

#[test]
fn tokens_are_sorted_ascending() {
    let ring = HashRing::with_vnodes(100);
    ring.add_node(node("node1"));
    ring.add_node(node("node2"));

    let tokens = ring.tokens();
    for window in tokens.windows(2) {
        assert!(window[0].0 <= window[1].0);
    }
}

#[test]
fn partitioner_name_reports_md5() {
    let ring = HashRing::new();
    assert_eq!(ring.partitioner_name(), "Md5Partitioner");
}
