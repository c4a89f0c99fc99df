//! A thin wire-protocol shell for manual testing, grounded on `client.py`
//! (which sent the same five actions over a pickle socket; this one speaks
//! the length-framed JSON protocol instead).

use clap::{Parser, Subcommand};
use tokio::net::TcpStream;

use cli::config::Config;
use corelib::network::{read_message, write_message};
use corelib::{Request, Response};

#[derive(Parser, Debug)]
#[command(about = "Talk to a consistent-hash cache primary")]
struct Args {
    /// Primary host:port to connect to.
    #[arg(long, default_value_t = format!("127.0.0.1:{}", Config::default().primary_port))]
    primary: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Get { key: String },
    Set { key: String, value: String },
    Delete { key: String },
    ListKeys,
    KeyMetadata { key: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let request = match args.command {
        Command::Get { key } => Request::get(key),
        Command::Set { key, value } => Request::set(key, value),
        Command::Delete { key } => Request::delete(key),
        Command::ListKeys => Request::list_keys(),
        Command::KeyMetadata { key } => Request::key_metadata(key),
    };

    let mut stream = TcpStream::connect(&args.primary).await?;
    write_message(&mut stream, &request).await?;
    let response: Response = read_message(&mut stream).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
