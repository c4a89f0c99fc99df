//! Replication strategy abstraction.
//!
//! A strategy determines how many replicas to create for a key and which
//! ring members hold them. The only strategy this spec calls for is the
//! ring's own clockwise walk (§4.1); the trait exists so the primary's
//! request handler is not hard-wired to one concrete type (the teacher's
//! `NetworkTopologyStrategy` — cross-DC/rack placement — is dropped here;
//! see DESIGN.md).

pub mod simple;

pub use simple::SimpleStrategy;

use corelib::{HashRing, NodeId};

/// Determines replica placement for a key.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Number of replicas this strategy targets (the configured `R`).
    fn replication_factor(&self) -> usize;

    /// Ordered, distinct replica list for `key` (first element is the
    /// primary owner, §4.1's order-preserving property).
    fn replicas_for_key(&self, ring: &HashRing, key: &str) -> Vec<NodeId>;

    fn name(&self) -> &'static str;
}
