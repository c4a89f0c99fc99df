//! Binaries for the three processes this system runs:
//! - `primary` — connection server (H), request handler (E), membership
//!   monitor (F), and redistribution engine (G)
//! - `worker` — a bounded LRU cache speaking the same wire protocol
//! - `client` — a thin wire-protocol shell for manual testing (§1: the CLI
//!   client is an external collaborator, not part of the core)

pub mod config;
pub mod lru;
pub mod primary;
pub mod worker;
