//! Consistent hash ring implementation.
//!
//! The ring manages vnode positions and provides the placement operations
//! (§4.1) used by the primary's request handler and membership monitor.

pub mod ring;

pub use ring::{HashRing, Ring, RingBuilder, DEFAULT_VNODES};
