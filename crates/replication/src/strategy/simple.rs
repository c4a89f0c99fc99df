//! Simple replication strategy: `R` replicas placed by walking the ring
//! clockwise from the key's token (§4.1's `get_replicas`, the only
//! placement scheme this spec defines).

use crate::error::ReplicationError;
use crate::strategy::ReplicationStrategy;
use corelib::{HashRing, NodeId};

#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    replication_factor: usize,
}

impl SimpleStrategy {
    pub fn new(replication_factor: usize) -> Result<Self, ReplicationError> {
        if replication_factor == 0 {
            return Err(ReplicationError::InvalidReplicationFactor(
                replication_factor,
            ));
        }
        Ok(Self { replication_factor })
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn replicas_for_key(&self, ring: &HashRing, key: &str) -> Vec<NodeId> {
        ring.get_replicas(key, self.replication_factor)
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
