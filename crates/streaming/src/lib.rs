//! Worker-facing client (component C, §2): opens one short-lived connection
//! per call, sends a single framed request, and reads a single framed
//! reply. Used by replication fan-out, the membership monitor's liveness
//! probe, and the redistribution engine's fetch-from-replica step.
//!
//! The wire schema and its framing live in `corelib::network`; this crate
//! only owns the call semantics (timeouts, one-shot connections).

pub mod client;
pub mod error;

pub use client::WorkerClient;
pub use error::StreamingError;
