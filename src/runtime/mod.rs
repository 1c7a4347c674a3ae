use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::types::ContainerDetails;

pub mod docker;
pub use docker::DockerRuntime;

#[cfg(test)]
pub mod fake;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0}")]
    Docker(#[from] bollard::errors::Error),
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no regular file at {path} in container {container}")]
    MissingFile { container: String, path: String },
    #[error("invalid container path: {0}")]
    InvalidPath(String),
}

impl RuntimeError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// The container runtime operations the enumeration pass depends on.
#[async_trait]
pub trait ContainerRuntime {
    /// Identifiers of running containers, in the runtime's own order.
    async fn list_running(&self) -> Result<Vec<String>>;

    /// Name, attached networks and network mode of one container.
    async fn inspect(&self, id: &str) -> Result<ContainerDetails>;

    /// Copy a single file out of `container` to `local_path`.
    async fn copy_from(&self, container: &str, remote_path: &str, local_path: &Path)
        -> Result<()>;

    /// Copy `local_path` into `container`, replacing the file at `remote_path`.
    async fn copy_into(&self, local_path: &Path, container: &str, remote_path: &str)
        -> Result<()>;
}
