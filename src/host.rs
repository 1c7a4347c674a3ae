//! Best-effort lookup of the host's primary address.
//!
//! Containers running with `--network host` have no per-network address of
//! their own, so they are reported under the host's address instead.

use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

use crate::types::NOT_AVAILABLE;

#[async_trait]
pub trait HostAddress {
    /// The host's primary address, or `N/A` when it cannot be determined.
    async fn host_address(&self) -> String;
}

/// Resolves the host address with `hostname -I`.
pub struct HostnameCommand {
    program: String,
}

impl HostnameCommand {
    /// Run `program -I` instead of `hostname -I`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for HostnameCommand {
    fn default() -> Self {
        Self::with_program("hostname")
    }
}

#[async_trait]
impl HostAddress for HostnameCommand {
    async fn host_address(&self) -> String {
        let output = match Command::new(&self.program).arg("-I").output().await {
            Ok(output) => output,
            Err(e) => {
                warn!("Failed to run {}: {}", self.program, e);
                return NOT_AVAILABLE.to_string();
            }
        };
        if !output.status.success() {
            warn!("{} -I exited with {}", self.program, output.status);
            return NOT_AVAILABLE.to_string();
        }

        match first_address(&String::from_utf8_lossy(&output.stdout)) {
            Some(addr) => {
                debug!("Host address: {}", addr);
                addr
            }
            None => {
                warn!("{} -I returned no addresses", self.program);
                NOT_AVAILABLE.to_string()
            }
        }
    }
}

fn first_address(stdout: &str) -> Option<String> {
    stdout.split_whitespace().next().map(str::to_string)
}
