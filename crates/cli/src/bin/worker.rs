//! A worker cache process: accepts connections and dispatches each request
//! to a bounded LRU cache, grounded on `worker_node.py`'s `WorkerNode.start`.

use std::sync::Arc;

use clap::Parser;
use tokio::net::{TcpListener, TcpStream};

use cli::config::Config;
use cli::worker::WorkerState;
use corelib::network::{read_message, write_message};
use corelib::{Request, Response};

#[derive(Parser, Debug)]
#[command(about = "Consistent-hash cache worker")]
struct Args {
    /// Port to accept connections on.
    #[arg(long)]
    port: u16,

    /// Maximum number of entries this worker's cache holds.
    #[arg(long, default_value_t = Config::default().worker_capacity)]
    capacity: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let state = Arc::new(WorkerState::new(args.capacity));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, capacity = args.capacity, "worker listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, state).await {
                tracing::debug!(%peer, %err, "connection ended");
            }
        });
    }
}

/// One request, one reply, then the connection closes (§4.4: no reuse, no
/// pipelining).
async fn handle_connection(mut stream: TcpStream, state: Arc<WorkerState>) -> anyhow::Result<()> {
    let request: Request = read_message(&mut stream).await?;
    let response: Response = state.handle(&request);
    write_message(&mut stream, &response).await?;
    Ok(())
}
