//! Errors for replica-selection strategies.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplicationError {
    #[error("replication factor must be at least 1, got {0}")]
    InvalidReplicationFactor(usize),
}
