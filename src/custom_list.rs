//! Synchronisation of a Pi-hole style custom host list.
//!
//! A run never edits the appliance's file in place. The list is first copied
//! out as an immutable `.bak` snapshot, duplicated into a `.new` working copy
//! that receives the appended entries, and only the finished working copy is
//! copied back once every container has been processed. Both artifacts are
//! named after the run's start timestamp and left in the output directory.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::runtime::{ContainerRuntime, RuntimeError};

/// Per-invocation settings fixed at process start.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Seconds since the epoch when the run started.
    pub timestamp: u64,
    pub output_dir: PathBuf,
}

impl RunContext {
    pub fn new(timestamp: u64, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            timestamp,
            output_dir: output_dir.into(),
        }
    }

    /// Capture the current time as the run timestamp.
    pub fn starting_now(output_dir: impl Into<PathBuf>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::new(timestamp, output_dir)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.artifact_path("bak")
    }

    pub fn working_path(&self) -> PathBuf {
        self.artifact_path("new")
    }

    fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}-custom.list.{}", self.timestamp, suffix))
    }
}

/// Stages and publishes the custom list of one appliance container.
pub struct CustomListSync<'a, R: ?Sized> {
    runtime: &'a R,
    appliance: String,
    remote_path: String,
}

impl<'a, R: ContainerRuntime + ?Sized> CustomListSync<'a, R> {
    pub fn new(
        runtime: &'a R,
        appliance: impl Into<String>,
        remote_path: impl Into<String>,
    ) -> Self {
        Self {
            runtime,
            appliance: appliance.into(),
            remote_path: remote_path.into(),
        }
    }

    pub fn appliance(&self) -> &str {
        &self.appliance
    }

    /// Copy the appliance's list to the backup path, duplicate it into the
    /// working path and return the working path.
    pub async fn stage(&self, ctx: &RunContext) -> Result<PathBuf> {
        let backup = ctx.backup_path();
        let working = ctx.working_path();

        self.runtime
            .copy_from(&self.appliance, &self.remote_path, &backup)
            .await
            .map_err(Error::Stage)?;
        fs::copy(&backup, &working).map_err(|e| Error::Stage(RuntimeError::io(&working, e)))?;

        info!(
            "Staged {}:{} as {}",
            self.appliance,
            self.remote_path,
            working.display()
        );
        Ok(working)
    }

    /// Replace the appliance's list with the working copy.
    pub async fn publish(&self, working: &Path) -> Result<()> {
        self.runtime
            .copy_into(working, &self.appliance, &self.remote_path)
            .await
            .map_err(Error::Publish)?;
        info!("Published {} to {}", working.display(), self.appliance);
        Ok(())
    }
}

/// Append `"<address> <name>"` to the working list unless an identical line
/// is already present. Returns whether a line was written.
pub fn append_entry(name: &str, address: &str, working: &Path) -> Result<bool> {
    append_line(name, address, working).map_err(Error::Append)
}

fn append_line(name: &str, address: &str, working: &Path) -> io::Result<bool> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(working)?;

    let mut existing = String::new();
    file.read_to_string(&mut existing)?;

    let entry = format!("{address} {name}");
    if existing.lines().any(|line| line == entry) {
        debug!("{} already listed", entry);
        return Ok(false);
    }

    let mut buf = String::with_capacity(entry.len() + 2);
    if !existing.is_empty() && !existing.ends_with('\n') {
        buf.push('\n');
    }
    buf.push_str(&entry);
    buf.push('\n');
    file.write_all(buf.as_bytes())?;
    debug!("Appended {} to {}", entry, working.display());
    Ok(true)
}
