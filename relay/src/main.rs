use std::thread;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info};

use relay::batch::BatchAgent;
use relay::collector;
use relay::config::RelayConfig;
use relay::device::{DeviceSource, SimulatedDevice};
use relay::throttle;
use relay::transport::TcpTransport;

/// Poll the robot and relay its telemetry to a monitoring proxy.
#[derive(Debug, Parser)]
struct Args {
    /// Source tag identifying this robot on the proxy
    #[arg(long, env = "RELAY_SOURCE", default_value = "my_vector")]
    source: String,

    /// Host the proxy listens on
    #[arg(long, env = "PROXY_HOST", default_value = "127.0.0.1")]
    proxy_host: String,

    /// Port the proxy listens on
    #[arg(long, env = "PROXY_PORT", default_value_t = 2878)]
    proxy_port: u16,

    /// Seconds between polling cycles
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 30)]
    interval: u64,

    /// Metric lines per chunk sent to the proxy
    #[arg(long, env = "CHUNK_SIZE", default_value_t = 100)]
    chunk_size: usize,

    /// Milliseconds to wait between chunk sends
    #[arg(long, env = "PACING_MS", default_value_t = 500)]
    pacing_ms: u64,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = RelayConfig {
        proxy_host: args.proxy_host,
        proxy_port: args.proxy_port,
        chunk_size: args.chunk_size,
        pacing: Duration::from_millis(args.pacing_ms),
        default_source: args.source,
        poll_interval: Duration::from_secs(args.interval),
    };

    info!("Starting telemetry relay");
    info!(
        "Proxy: {}:{}, chunk size: {}, pacing: {:?}, source: {}",
        config.proxy_host, config.proxy_port, config.chunk_size, config.pacing,
        config.default_source
    );

    let mut device = SimulatedDevice::new();
    let mut transport = TcpTransport::new(&config.proxy_host, config.proxy_port);
    let mut previous_pose = None;

    loop {
        let snapshot = match device.poll() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Device poll failed: {}", e);
                thread::sleep(config.poll_interval);
                continue;
            }
        };

        let mut batch = BatchAgent::new(Utc::now().timestamp(), &config);
        for (name, value) in collector::collect(&snapshot, previous_pose.as_ref()) {
            batch.append(name, value, None, None);
        }

        let states = collector::active_states(&snapshot);
        if let Some(tag) = collector::state_tag(&states) {
            batch.append("robot.currentstate", Some(1.0), None, Some(&tag));
        }

        previous_pose = snapshot.pose.clone();

        info!("Cycle at {}: {} points to send", batch.timestamp(), batch.len());
        throttle::flush(&batch, &mut transport, &config);

        thread::sleep(config.poll_interval);
    }
}
