use std::io::Write;
use std::net::{Shutdown, TcpStream};

use tracing::{debug, error};

/// Destination for one serialized chunk.
///
/// The relay only needs a best-effort outcome: transport failures are
/// converted to `false` at this boundary and must never propagate. Retry
/// policy, if any, belongs to the caller.
pub trait Transport {
    fn send(&mut self, payload: &[u8]) -> bool;
}

/// One fresh TCP connection per chunk: connect, write everything, half-close
/// the write side so the proxy sees EOF, drop. No pooling, no retry, no
/// connect timeout.
pub struct TcpTransport {
    addr: String,
}

impl TcpTransport {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            addr: format!("{}:{}", host, port),
        }
    }

    fn send_inner(&self, payload: &[u8]) -> std::io::Result<()> {
        let mut stream = TcpStream::connect(&self.addr)?;
        stream.write_all(payload)?;
        stream.shutdown(Shutdown::Write)?;
        Ok(())
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, payload: &[u8]) -> bool {
        match self.send_inner(payload) {
            Ok(()) => {
                debug!("Sent {} bytes to {}", payload.len(), self.addr);
                true
            }
            Err(e) => {
                error!("Failed to send to proxy at {}: {}", self.addr, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_send_delivers_full_payload() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut received = Vec::new();
            stream.read_to_end(&mut received).unwrap();
            received
        });

        let mut transport = TcpTransport::new("127.0.0.1", port);
        assert!(transport.send(b"robot.lspeed 0.000000 42 source=my_vector\n"));

        let received = handle.join().unwrap();
        assert_eq!(received, b"robot.lspeed 0.000000 42 source=my_vector\n");
    }

    #[test]
    fn test_send_to_closed_port_returns_false() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut transport = TcpTransport::new("127.0.0.1", port);
        assert!(!transport.send(b"x 1.000000 42 source=s\n"));
    }
}
