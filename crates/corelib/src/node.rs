//! Node identity and transport endpoint for the ring.
//!
//! A `NodeId` is an opaque string drawn from a fixed roster declared at
//! startup (no discovery). It is backed by `Arc<str>` so it stays cheap to
//! clone and compare wherever the ring, catalog, or monitor pass it around.

use std::fmt;
use std::sync::Arc;

/// Opaque identifier for a node in the (fixed, small) cluster roster.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(Arc<str>);

impl NodeId {
    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(Arc::from(s.as_str()))
    }
}

impl From<&String> for NodeId {
    fn from(s: &String) -> Self {
        Self(Arc::from(s.as_str()))
    }
}

/// A roster entry: a node identity plus the endpoint workers/clients dial.
///
/// Kept small and cheap to clone; heavy mutable state (connections, caches)
/// lives elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub host: String,
    pub port: u16,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, host: impl Into<String>, port: u16) -> Self {
        Self {
            id: id.into(),
            host: host.into(),
            port,
        }
    }

    /// `host:port`, the address workers and clients dial.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
