//! The worker process's request handler: a bounded LRU cache behind the
//! same wire protocol the primary speaks, grounded on `WorkerNode.handle_client`.
//!
//! The original dispatches DELETE/GET/KEY_METADATA misses to a `"NOT_FOUND"`
//! status string that this protocol has no dedicated variant for; §6 folds
//! all miss conditions into `MISS`, so we carry the original's sentinel
//! forward as `MISS`'s optional `message` field rather than inventing a new
//! wire status.
use parking_lot::Mutex;

use corelib::{Request, Response};

use crate::lru::LruCache;

const NOT_FOUND: &str = "NOT_FOUND";

pub struct WorkerState {
    cache: Mutex<LruCache>,
}

impl WorkerState {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Dispatches one request exactly as the original `handle_client` would,
    /// minus the network I/O (handled by the binary's connection loop).
    pub fn handle(&self, request: &Request) -> Response {
        match request.action.as_str() {
            "GET" => {
                let Some(key) = &request.key else {
                    return Response::error("GET requires a key");
                };
                let mut cache = self.cache.lock();
                match cache.get(key) {
                    Some(value) => Response::ok_value(Some(value)),
                    None => Response::miss(),
                }
            }
            "SET" => {
                let (Some(key), Some(value)) = (&request.key, &request.value) else {
                    return Response::error("SET requires a key and value");
                };
                self.cache.lock().put(key.clone(), value.clone());
                Response::stored()
            }
            "DELETE" => {
                let Some(key) = &request.key else {
                    return Response::error("DELETE requires a key");
                };
                if self.cache.lock().remove(key) {
                    Response::deleted()
                } else {
                    Response::miss_msg(NOT_FOUND)
                }
            }
            "KEY_METADATA" => {
                let Some(key) = &request.key else {
                    return Response::error("KEY_METADATA requires a key");
                };
                let mut cache = self.cache.lock();
                match cache.get(key) {
                    Some(value) => Response::ok_metadata(None, Vec::new(), value),
                    None => Response::miss_msg(NOT_FOUND),
                }
            }
            "LIST_KEYS" => Response::ok_keys(self.cache.lock().keys()),
            other => Response::error(format!("unknown action: {other}")),
        }
    }
}
