use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// TCP connect check. A completed handshake means the service is listening;
/// the connection is closed straight away without sending anything.
#[derive(Debug, Clone, Copy)]
pub struct TcpPortProbe {
    timeout: Duration,
}

impl TcpPortProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn check(&self, address: IpAddr, port: u16) -> bool {
        let target = SocketAddr::new(address, port);
        match tokio::time::timeout(self.timeout, TcpStream::connect(target)).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                debug!(target = %target, error = %e, "TCP connect refused");
                false
            }
            Err(_) => {
                debug!(target = %target, "TCP connect timed out");
                false
            }
        }
    }
}
