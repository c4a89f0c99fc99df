//! Static roster and tunables (§6). Defaults mirror the original system's
//! `config.py`: four workers on ports 5001-5004, primary on 4001, `R=2`,
//! `V=100`, worker capacity 3.

use std::time::Duration;

use corelib::{Node, NodeId};

pub const DEFAULT_REPLICATION_FACTOR: usize = 2;
pub const DEFAULT_VIRTUAL_NODES: usize = 100;
pub const DEFAULT_WORKER_CAPACITY: usize = 3;
pub const DEFAULT_PRIMARY_PORT: u16 = 4001;

#[derive(Debug, Clone)]
pub struct Config {
    pub primary_port: u16,
    pub replication_factor: usize,
    pub virtual_nodes: usize,
    pub worker_capacity: usize,
    /// Interval between membership monitor cycles (§4.3 `T_probe`, default 3s).
    pub probe_interval: Duration,
    /// Per-call timeout for the liveness probe (§5, default 1s).
    pub probe_timeout: Duration,
    /// Per-call timeout for redistribution's fetch-from-replica (§5, default 3s).
    pub fetch_timeout: Duration,
    /// Per-call timeout for replication fan-out (§5, default 3s).
    pub replicate_timeout: Duration,
    pub roster: Vec<Node>,
}

impl Config {
    /// Endpoint metadata for a roster entry, if `id` is in the roster.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.roster.iter().find(|n| &n.id == id)
    }
}

impl Default for Config {
    fn default() -> Self {
        let roster = vec![
            Node::new("node1", "127.0.0.1", 5001),
            Node::new("node2", "127.0.0.1", 5002),
            Node::new("node3", "127.0.0.1", 5003),
            Node::new("node4", "127.0.0.1", 5004),
        ];
        Self {
            primary_port: DEFAULT_PRIMARY_PORT,
            replication_factor: DEFAULT_REPLICATION_FACTOR,
            virtual_nodes: DEFAULT_VIRTUAL_NODES,
            worker_capacity: DEFAULT_WORKER_CAPACITY,
            probe_interval: Duration::from_secs(3),
            probe_timeout: Duration::from_secs(1),
            fetch_timeout: Duration::from_secs(3),
            replicate_timeout: Duration::from_secs(3),
            roster,
        }
    }
}
