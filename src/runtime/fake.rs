//! In-memory [`ContainerRuntime`] used by the unit tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ContainerRuntime, Result, RuntimeError};
use crate::types::ContainerDetails;

#[derive(Default)]
pub struct FakeRuntime {
    containers: Vec<(String, ContainerDetails)>,
    files: Mutex<HashMap<(String, String), Vec<u8>>>,
    inspect_calls: Mutex<Vec<String>>,
    fail_list: bool,
    fail_inspect: Option<String>,
    fail_upload: bool,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a running container attached to the given networks.
    pub fn with_container(
        mut self,
        id: &str,
        name: &str,
        networks: &[(&str, &str)],
        network_mode: &str,
    ) -> Self {
        let details = ContainerDetails {
            name: format!("/{name}"),
            networks: networks
                .iter()
                .map(|(net, addr)| (net.to_string(), addr.to_string()))
                .collect(),
            network_mode: Some(network_mode.to_string()),
        };
        self.containers.push((id.to_string(), details));
        self
    }

    pub fn with_file(self, container: &str, path: &str, contents: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert((container.to_string(), path.to_string()), contents.as_bytes().to_vec());
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Make `inspect` fail for one listed container.
    pub fn failing_inspect(mut self, id: &str) -> Self {
        self.fail_inspect = Some(id.to_string());
        self
    }

    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn file(&self, container: &str, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&(container.to_string(), path.to_string()))
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn inspect_calls(&self) -> Vec<String> {
        self.inspect_calls.lock().unwrap().clone()
    }
}

fn unavailable(what: &str) -> RuntimeError {
    RuntimeError::Docker(bollard::errors::Error::DockerResponseServerError {
        status_code: 500,
        message: format!("{what} unavailable"),
    })
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn list_running(&self) -> Result<Vec<String>> {
        if self.fail_list {
            return Err(unavailable("container list"));
        }
        Ok(self.containers.iter().map(|(id, _)| id.clone()).collect())
    }

    async fn inspect(&self, id: &str) -> Result<ContainerDetails> {
        self.inspect_calls.lock().unwrap().push(id.to_string());
        if self.fail_inspect.as_deref() == Some(id) {
            return Err(unavailable(id));
        }
        self.containers
            .iter()
            .find(|(cid, _)| cid == id)
            .map(|(_, details)| details.clone())
            .ok_or_else(|| unavailable(id))
    }

    async fn copy_from(
        &self,
        container: &str,
        remote_path: &str,
        local_path: &Path,
    ) -> Result<()> {
        let contents = self
            .files
            .lock()
            .unwrap()
            .get(&(container.to_string(), remote_path.to_string()))
            .cloned()
            .ok_or_else(|| RuntimeError::MissingFile {
                container: container.to_string(),
                path: remote_path.to_string(),
            })?;
        std::fs::write(local_path, contents).map_err(|e| RuntimeError::io(local_path, e))
    }

    async fn copy_into(
        &self,
        local_path: &Path,
        container: &str,
        remote_path: &str,
    ) -> Result<()> {
        if self.fail_upload {
            return Err(unavailable(container));
        }
        let contents = std::fs::read(local_path).map_err(|e| RuntimeError::io(local_path, e))?;
        self.files
            .lock()
            .unwrap()
            .insert((container.to_string(), remote_path.to_string()), contents);
        Ok(())
    }
}
