//! Core library for the distributed cache's placement and transport layer.
//!
//! This crate provides:
//! - The consistent hash ring and its vnode/token math (§4.1)
//! - Node identity
//! - The wire protocol (request/response schema + length framing, §6)

pub mod error;
pub mod network;
pub mod node;
pub mod ring;
pub mod token;
pub mod vnode;

pub use error::{Error, Result};
pub use network::{Request, Response, WireError, WireResult};
pub use node::{Node, NodeId};
pub use ring::{HashRing, Ring, RingBuilder};
pub use token::Token;
pub use vnode::VirtualNode;
