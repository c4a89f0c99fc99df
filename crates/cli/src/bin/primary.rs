//! The primary process: connection server (H) in front of the request
//! handler (E), plus the membership monitor (F) running alongside it,
//! grounded on `primary_server.py`'s `start`/`node_monitor_loop`.

use std::sync::Arc;

use clap::Parser;
use tokio::net::{TcpListener, TcpStream};

use cli::config::Config;
use cli::primary::PrimaryState;
use corelib::network::{read_message, write_message};
use corelib::{Request, Response};

#[derive(Parser, Debug)]
#[command(about = "Consistent-hash cache primary")]
struct Args {
    /// Port to accept client connections on.
    #[arg(long, default_value_t = Config::default().primary_port)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = Config::default();
    config.primary_port = args.port;
    let probe_interval = config.probe_interval;

    let state = Arc::new(PrimaryState::new(config));

    let monitor_state = state.clone();
    tokio::spawn(async move {
        loop {
            monitor_state.monitor_once().await;
            tokio::time::sleep(probe_interval).await;
        }
    });

    let addr = format!("0.0.0.0:{}", state.port());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "primary listening");

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
async fn handle_connection(mut stream: TcpStream, state: Arc<PrimaryState>) -> anyhow::Result<()> {
    let request: Request = read_message(&mut stream).await?;
    let response: Response = state.handle(&request).await;
    write_message(&mut stream, &response).await?;
    Ok(())
}
