//! The primary process: request handler (E), membership monitor (F), and
//! redistribution engine (G), grounded on `primary_server.py`.
//!
//! The catalog is the system's source of truth (write-through on every
//! SET); workers are a best-effort read cache in front of it. A GET tries
//! each replica in ring order before falling back to the catalog, exactly
//! as the original's `fetch_value_from_node` does before its own
//! datastore fallback.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;

use corelib::{HashRing, NodeId, Request, Response};
use replication::{Catalog, ReplicationStrategy, SimpleStrategy};
use streaming::WorkerClient;

use crate::config::Config;

/// A roster member's last-observed liveness (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Never successfully probed since this process started.
    Unknown,
    Member,
    Absent,
}

pub struct PrimaryState {
    config: Config,
    ring: HashRing,
    catalog: Arc<Catalog>,
    strategy: SimpleStrategy,
    statuses: DashMap<NodeId, NodeStatus>,
}

impl PrimaryState {
    /// Builds a primary with every roster node starting `UNKNOWN` and
    /// absent from the ring — the monitor loop is responsible for adding a
    /// node on its first successful probe (§4.3: an `UNKNOWN` node must be
    /// classified before it counts as a ring member).
    pub fn new(config: Config) -> Self {
        let ring = HashRing::with_vnodes(config.virtual_nodes);
        let statuses = DashMap::new();
        for node in &config.roster {
            statuses.insert(node.id.clone(), NodeStatus::Unknown);
        }
        let strategy = SimpleStrategy::new(config.replication_factor)
            .expect("configured replication factor must be at least 1");
        Self {
            config,
            ring,
            catalog: Arc::new(Catalog::new()),
            strategy,
            statuses,
        }
    }

    pub fn ring(&self) -> &HashRing {
        &self.ring
    }

    pub fn port(&self) -> u16 {
        self.config.primary_port
    }

    /// Dispatches one client request exactly as `handle_client` does (§4.2).
    pub async fn handle(&self, request: &Request) -> Response {
        match request.action.as_str() {
            "GET" => self.handle_get(request).await,
            "SET" => self.handle_set(request).await,
            "DELETE" => self.handle_delete(request).await,
            "LIST_KEYS" => self.handle_list_keys().await,
            "KEY_METADATA" => self.handle_key_metadata(request),
            other => Response::error(format!("unknown action: {other}")),
        }
    }

    async fn handle_get(&self, request: &Request) -> Response {
        let Some(key) = &request.key else {
            return Response::error("GET requires a key");
        };
        let replicas = self.strategy.replicas_for_key(&self.ring, key);
        if let Some(value) = self.fetch_from_a_replica(&replicas, key).await {
            return Response::ok_value(Some(value));
        }
        match self.catalog.get(key) {
            Some(value) => Response::ok_value(Some(value)),
            None => Response::miss(),
        }
    }

    /// Tries each replica in ring order, returning the first hit (§4.2).
    async fn fetch_from_a_replica(&self, replicas: &[NodeId], key: &str) -> Option<String> {
        for replica in replicas {
            let node = self.ring.get_node_info(replica)?;
            let client = WorkerClient::new(&node);
            match client.call(&Request::get(key), self.config.fetch_timeout).await {
                Ok(response) => {
                    if let Some(value) = response.value() {
                        return Some(value.to_string());
                    }
                }
                Err(err) => {
                    tracing::debug!(node = %replica, %err, "replica fetch failed");
                }
            }
        }
        None
    }

    async fn handle_set(&self, request: &Request) -> Response {
        let (Some(key), Some(value)) = (&request.key, &request.value) else {
            return Response::error("SET requires a key and value");
        };
        if self.ring.node_count() == 0 {
            return Response::error("no active nodes can serve this key");
        }
        self.catalog.set(key.clone(), value.clone());
        let replicas = self.strategy.replicas_for_key(&self.ring, key);
        self.spawn_replicate(&replicas, Request::set(key.clone(), value.clone()));
        Response::stored()
    }

    async fn handle_delete(&self, request: &Request) -> Response {
        let Some(key) = &request.key else {
            return Response::error("DELETE requires a key");
        };
        let existed = self.catalog.delete(key);
        let replicas = self.strategy.replicas_for_key(&self.ring, key);
        self.spawn_replicate(&replicas, Request::delete(key.clone()));
        if existed {
            Response::deleted()
        } else {
            Response::miss()
        }
    }

    /// Union of the catalog's keys and every live member's reported key set
    /// (§4.2), grounded on `primary_server.py`'s `handle_client` LIST_KEYS
    /// branch, which sends a `LIST_KEYS` request to every node in
    /// `self.hash_ring.nodes` and unions the replies.
    async fn handle_list_keys(&self) -> Response {
        let members = self.ring.members();
        let mut keys: HashSet<String> = self.catalog.keys().into_iter().collect();

        for id in &members {
            let Some(node) = self.ring.get_node_info(id) else {
                continue;
            };
            let client = WorkerClient::new(&node);
            match client.call(&Request::list_keys(), self.config.fetch_timeout).await {
                Ok(Response::Ok(payload)) => {
                    if let Some(worker_keys) = payload.keys {
                        keys.extend(worker_keys);
                    }
                }
                Ok(_) => {}
                Err(err) => tracing::debug!(node = %id, %err, "list_keys probe failed"),
            }
        }

        let mut keys: Vec<String> = keys.into_iter().collect();
        keys.sort();
        let active = members.into_iter().map(|id| id.to_string()).collect();
        Response::ok_keys_with_nodes(keys, active)
    }

    /// KEY_METADATA always answers `OK` (§4.2, §6 has no MISS/ERROR entry
    /// for this action), grounded on `primary_server.py`'s unconditional
    /// `status: "OK"` reply whose value falls back to the literal sentinel
    /// `"In worker cache"` when the catalog doesn't have it.
    fn handle_key_metadata(&self, request: &Request) -> Response {
        let Some(key) = &request.key else {
            return Response::error("KEY_METADATA requires a key");
        };
        let primary = self.ring.get_node(key).map(|id| id.to_string());
        let replicas = self
            .strategy
            .replicas_for_key(&self.ring, key)
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        let value = self
            .catalog
            .get(key)
            .unwrap_or_else(|| "In worker cache".to_string());
        Response::ok_metadata(primary, replicas, value)
    }

    /// Fire-and-forget fan-out, grounded on `replicator.py`'s `replicate`:
    /// the caller does not wait on these, and a slow or dead replica never
    /// blocks the client's reply.
    fn spawn_replicate(&self, replicas: &[NodeId], request: Request) {
        for id in replicas {
            let Some(node) = self.ring.get_node_info(id) else {
                continue;
            };
            let client = WorkerClient::new(&node);
            let req = request.clone();
            let timeout = self.config.replicate_timeout;
            let id = id.clone();
            tokio::spawn(async move {
                if let Err(err) = client.call(&req, timeout).await {
                    tracing::warn!(node = %id, %err, "replication call failed");
                }
            });
        }
    }

    /// One membership monitor cycle (§4.3): probes every roster node and
    /// mutates the ring on any UNKNOWN/MEMBER/ABSENT transition, triggering
    /// redistribution when a member is newly judged absent.
    pub async fn monitor_once(&self) {
        for node in &self.config.roster {
            let client = WorkerClient::new(node);
            let alive = client.probe(self.config.probe_timeout).await;
            let previous = self
                .statuses
                .get(&node.id)
                .map(|s| *s)
                .unwrap_or(NodeStatus::Unknown);

            if alive {
                if previous != NodeStatus::Member {
                    tracing::info!(node = %node.id, "node joined the ring");
                    self.ring.add_node(node.clone());
                }
                self.statuses.insert(node.id.clone(), NodeStatus::Member);
            } else {
                if previous == NodeStatus::Member {
                    tracing::warn!(node = %node.id, "node failed its liveness probe, redistributing its keys");
                    self.handle_node_failure(&node.id).await;
                }
                self.statuses.insert(node.id.clone(), NodeStatus::Absent);
            }
        }
    }

    /// Redistribution engine (G), grounded on
    /// `redistribute_keys_from_failed_node`: the catalog is already
    /// authoritative for every key's value, so rescue is really "recompute
    /// this key's replica set and re-push the catalog's value to it."
    async fn handle_node_failure(&self, failed: &NodeId) {
        let owned: Vec<String> = self
            .catalog
            .keys()
            .into_iter()
            .filter(|key| self.ring.get_node(key).as_ref() == Some(failed))
            .collect();

        self.ring.remove_node(failed);

        for key in owned {
            if let Some(value) = self.catalog.get(&key) {
                let replicas = self.strategy.replicas_for_key(&self.ring, &key);
                self.spawn_replicate(&replicas, Request::set(key, value));
            }
        }
    }

    /// Snapshot of every roster node's last-observed status, for reporting.
    pub fn statuses(&self) -> HashMap<NodeId, NodeStatus> {
        self.statuses
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
