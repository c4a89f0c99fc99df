//! One call to one worker, per §4.4: no connection reuse, no pipelining.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

use corelib::network::{read_message, write_message};
use corelib::{Node, Request, Response};

use crate::error::{Result, StreamingError};

/// Dials a single worker's endpoint for each call.
#[derive(Debug, Clone)]
pub struct WorkerClient {
    addr: String,
}

impl WorkerClient {
    pub fn new(node: &Node) -> Self {
        Self { addr: node.addr() }
    }

    /// Sends `request` and awaits the reply, bounding the whole round trip
    /// (connect + write + read) by `call_timeout`.
    pub async fn call(&self, request: &Request, call_timeout: Duration) -> Result<Response> {
        let mut stream = timeout(call_timeout, TcpStream::connect(&self.addr))
            .await
            .map_err(|_| StreamingError::ConnectTimeout(self.addr.clone()))??;

        timeout(call_timeout, async {
            write_message(&mut stream, request).await?;
            let response: Response = read_message(&mut stream).await?;
            Ok::<_, StreamingError>(response)
        })
        .await
        .map_err(|_| StreamingError::CallTimeout(self.addr.clone()))?
    }

    /// Liveness probe: "TCP accept succeeds within timeout" (§4.3).
    pub async fn probe(&self, probe_timeout: Duration) -> bool {
        matches!(
            timeout(probe_timeout, TcpStream::connect(&self.addr)).await,
            Ok(Ok(_))
        )
    }
}
