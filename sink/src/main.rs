use std::io::{BufRead, BufReader};
use std::net::TcpListener;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

/// Debug collector: accepts proxy-protocol connections and logs every metric
/// line received. Stands in for the real monitoring proxy during development.
#[derive(Debug, Parser)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "SINK_ADDR", default_value = "127.0.0.1:2878")]
    addr: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let listener = TcpListener::bind(&args.addr)
        .with_context(|| format!("failed to bind {}", args.addr))?;
    info!("Sink listening on {}", args.addr);

    let mut total: u64 = 0;
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Accept failed: {}", e);
                continue;
            }
        };

        let mut lines_in_chunk = 0;
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            match line {
                Ok(line) if line.is_empty() => {}
                Ok(line) => {
                    lines_in_chunk += 1;
                    total += 1;
                    info!("{}", line);
                }
                Err(e) => {
                    warn!("Read error: {}", e);
                    break;
                }
            }
        }
        info!("Chunk of {} lines received ({} total)", lines_in_chunk, total);
    }

    Ok(())
}
