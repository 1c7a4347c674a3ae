use super::{ContainerRuntime, Result, RuntimeError};
use crate::types::ContainerDetails;
use async_trait::async_trait;
use bollard::container::{
    DownloadFromContainerOptions, ListContainersOptions, UploadToContainerOptions,
};
use bollard::models::ContainerInspectResponse;
use bollard::Docker;
use bytes::Bytes;
use futures_util::stream::StreamExt;
use log::{debug, info};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// [`ContainerRuntime`] backed by the Docker Engine API.
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect to the local Docker daemon using default settings.
    /// This handles the unix socket on Linux and honours `DOCKER_HOST`.
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults()?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn list_running(&self) -> Result<Vec<String>> {
        let opts = ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        };
        let containers = self.docker.list_containers(Some(opts)).await?;
        debug!("Runtime reported {} running containers", containers.len());
        Ok(containers.into_iter().filter_map(|c| c.id).collect())
    }

    async fn inspect(&self, id: &str) -> Result<ContainerDetails> {
        let detail = self.docker.inspect_container(id, None).await?;
        Ok(details_from_inspect(detail))
    }

    async fn copy_from(
        &self,
        container: &str,
        remote_path: &str,
        local_path: &Path,
    ) -> Result<()> {
        let (_, file_name) = split_remote_path(remote_path)?;
        let opts = DownloadFromContainerOptions {
            path: remote_path.to_string(),
        };
        let mut stream = Box::pin(self.docker.download_from_container(container, Some(opts)));
        let mut archive = Vec::new();
        while let Some(chunk) = stream.next().await {
            archive.extend_from_slice(&chunk?);
        }
        debug!(
            "Downloaded {} byte archive of {}:{}",
            archive.len(),
            container,
            remote_path
        );

        let found = extract_file(&archive, file_name, local_path)
            .map_err(|e| RuntimeError::io(local_path, e))?;
        if !found {
            return Err(RuntimeError::MissingFile {
                container: container.to_string(),
                path: remote_path.to_string(),
            });
        }
        info!("Copied {}:{} to {}", container, remote_path, local_path.display());
        Ok(())
    }

    async fn copy_into(
        &self,
        local_path: &Path,
        container: &str,
        remote_path: &str,
    ) -> Result<()> {
        let (parent, file_name) = split_remote_path(remote_path)?;

        let mut contents = Vec::new();
        File::open(local_path)
            .and_then(|mut f| f.read_to_end(&mut contents))
            .map_err(|e| RuntimeError::io(local_path, e))?;
        let archive =
            single_file_archive(file_name, &contents).map_err(|e| RuntimeError::io(local_path, e))?;

        let opts = UploadToContainerOptions {
            path: parent.to_string(),
            ..Default::default()
        };
        self.docker
            .upload_to_container(container, Some(opts), Bytes::from(archive))
            .await?;
        info!("Copied {} to {}:{}", local_path.display(), container, remote_path);
        Ok(())
    }
}

fn details_from_inspect(detail: ContainerInspectResponse) -> ContainerDetails {
    let mut networks: Vec<(String, String)> = detail
        .network_settings
        .and_then(|s| s.networks)
        .unwrap_or_default()
        .into_iter()
        .map(|(name, endpoint)| (name, endpoint.ip_address.unwrap_or_default()))
        .collect();
    // Docker renders the network map in key order; the map we get back doesn't.
    networks.sort_by(|a, b| a.0.cmp(&b.0));

    ContainerDetails {
        name: detail.name.unwrap_or_default(),
        networks,
        network_mode: detail.host_config.and_then(|h| h.network_mode),
    }
}

/// Split an absolute container path into its parent directory and file name.
fn split_remote_path(remote_path: &str) -> Result<(&str, &str)> {
    match remote_path.rsplit_once('/') {
        Some((_, "")) | None => Err(RuntimeError::InvalidPath(remote_path.to_string())),
        Some(("", name)) => Ok(("/", name)),
        Some((parent, name)) => Ok((parent, name)),
    }
}

/// Write the regular file entry named `file_name` to `dest`. Returns `false`
/// when the archive has no such entry, e.g. because the remote path is a
/// directory.
fn extract_file(archive: &[u8], file_name: &str, dest: &Path) -> io::Result<bool> {
    let mut archive = tar::Archive::new(archive);
    for entry in archive.entries()? {
        let mut entry = entry?;
        if entry.header().entry_type().is_file() && entry.path()? == Path::new(file_name) {
            let mut file = File::create(dest)?;
            io::copy(&mut entry, &mut file)?;
            return Ok(true);
        }
    }
    Ok(false)
}

fn single_file_archive(file_name: &str, contents: &[u8]) -> io::Result<Vec<u8>> {
    let mtime = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut header = tar::Header::new_gnu();
    header.set_size(contents.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(mtime);

    let mut builder = tar::Builder::new(Vec::new());
    builder.append_data(&mut header, file_name, contents)?;
    builder.into_inner()
}
