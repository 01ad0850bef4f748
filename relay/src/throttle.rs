use std::thread;

use tracing::{error, info};

use crate::batch::BatchAgent;
use crate::config::RelayConfig;
use crate::transport::Transport;

/// Send a batch to the proxy in paced, bounded-size chunks.
///
/// Lines go out strictly in append order, at most `chunk_size` per send, each
/// chunk newline-joined with a trailing newline. The pacing sleep runs after
/// every chunk, including the last. A failed chunk is logged and dropped; the
/// remaining chunks are still attempted. An empty batch sends nothing and
/// sleeps nothing.
pub fn flush(batch: &BatchAgent, transport: &mut dyn Transport, config: &RelayConfig) {
    // slice::chunks panics on 0
    let chunk_size = config.chunk_size.max(1);

    for chunk in batch.lines().chunks(chunk_size) {
        let mut content = chunk.join("\n");
        content.push('\n');

        if transport.send(content.as_bytes()) {
            info!("Sent {} points to proxy", chunk.len());
        } else {
            error!("Failed to send {} points to proxy, chunk dropped", chunk.len());
        }

        thread::sleep(config.pacing);
    }
}
