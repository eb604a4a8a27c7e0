use super::reachability::ReachabilityCheck;
use async_trait::async_trait;
use hostpulse_domain::DomainError;
use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Extra wall-clock allowance for process startup on top of the ping timeout.
const SPAWN_GRACE: Duration = Duration::from_secs(1);

/// Shells out to the platform `ping` with one attempt and reads its exit
/// status. Used when raw ICMP sockets are not permitted.
#[derive(Debug, Clone)]
pub struct SystemPing {
    program: String,
}

impl SystemPing {
    pub fn new() -> Self {
        Self {
            program: "ping".to_string(),
        }
    }

    /// Overrides the executable, e.g. an absolute path.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn program_for(&self, address: IpAddr) -> &str {
        if cfg!(target_os = "macos") && address.is_ipv6() && self.program == "ping" {
            "ping6"
        } else {
            &self.program
        }
    }
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new()
    }
}

/// One echo, bounded by `timeout`, in the local `ping` dialect.
pub(crate) fn ping_args(address: IpAddr, timeout: Duration) -> Vec<String> {
    let secs = timeout.as_secs().max(1).to_string();
    let target = address.to_string();

    if cfg!(target_os = "windows") {
        let millis = timeout.as_millis().max(1).to_string();
        vec!["-n".into(), "1".into(), "-w".into(), millis, target]
    } else if cfg!(target_os = "macos") {
        vec!["-c".into(), "1".into(), "-t".into(), secs, target]
    } else {
        vec!["-c".into(), "1".into(), "-W".into(), secs, target]
    }
}

#[async_trait]
impl ReachabilityCheck for SystemPing {
    fn name(&self) -> &'static str {
        "system-ping"
    }

    async fn check(&self, address: IpAddr, timeout: Duration) -> Result<bool, DomainError> {
        let mut command = Command::new(self.program_for(address));
        command
            .args(ping_args(address, timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = command
            .spawn()
            .map_err(|e| DomainError::ProbeUnavailable(format!("spawn {}: {}", self.program, e)))?;

        match tokio::time::timeout(timeout + SPAWN_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                debug!(address = %address, status = %status, "System ping finished");
                Ok(status.success())
            }
            Ok(Err(e)) => Err(DomainError::IoError(format!("wait {}: {}", self.program, e))),
            Err(_) => {
                debug!(address = %address, "System ping overran its timeout");
                Ok(false)
            }
        }
    }
}
