//! One sequential pass over the running containers.
//!
//! For each container the enumerator resolves a display name and the
//! addresses it is reachable on, prints a report line and, when an appliance
//! is being synchronised, appends the first address to the working list.
//! Every call is awaited before the next one starts. The first failing
//! runtime call ends the pass.

use std::io::Write;

use log::{debug, info};

use crate::custom_list::{append_entry, CustomListSync, RunContext};
use crate::error::{Error, Result};
use crate::host::HostAddress;
use crate::report;
use crate::runtime::ContainerRuntime;
use crate::types::{normalize_name, ContainerRecord, HOST_NETWORK_MODE, NOT_AVAILABLE};

/// Counters describing a finished pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reported: usize,
    pub appended: usize,
}

pub struct Enumerator<'a, R: ?Sized, H: ?Sized> {
    runtime: &'a R,
    host: &'a H,
}

impl<'a, R, H> Enumerator<'a, R, H>
where
    R: ContainerRuntime + ?Sized,
    H: HostAddress + ?Sized,
{
    pub fn new(runtime: &'a R, host: &'a H) -> Self {
        Self { runtime, host }
    }

    /// Report every running container and, given `sync`, merge them into
    /// the appliance's custom list.
    pub async fn run<W: Write + ?Sized>(
        &self,
        ctx: &RunContext,
        sync: Option<&CustomListSync<'_, R>>,
        out: &mut W,
    ) -> Result<RunSummary> {
        let ids = self.runtime.list_running().await?;
        if ids.is_empty() {
            report::write_empty(out).map_err(Error::Report)?;
            return Ok(RunSummary::default());
        }
        info!("Found {} running containers", ids.len());

        let staged = match sync {
            Some(sync) => Some((sync, sync.stage(ctx).await?)),
            None => None,
        };

        let mut summary = RunSummary::default();
        for id in &ids {
            let record = self.resolve(id).await?;
            report::write_record(out, &record).map_err(Error::Report)?;
            summary.reported += 1;

            if let Some((_, working)) = &staged {
                if append_entry(&record.name, record.primary_address(), working)? {
                    summary.appended += 1;
                }
            }
        }

        if let Some((sync, working)) = &staged {
            sync.publish(working).await?;
            info!(
                "Added {} new entries to {}",
                summary.appended,
                sync.appliance()
            );
        }
        Ok(summary)
    }

    /// Build the report record for one container.
    pub async fn resolve(&self, id: &str) -> Result<ContainerRecord> {
        let details = self.runtime.inspect(id).await?;

        let mut addresses: Vec<String> = details
            .networks
            .iter()
            .filter(|(_, addr)| !addr.is_empty())
            .map(|(_, addr)| addr.clone())
            .collect();

        if addresses.is_empty() && details.network_mode.as_deref() == Some(HOST_NETWORK_MODE) {
            addresses.push(self.host.host_address().await);
        }
        if addresses.is_empty() {
            addresses.push(NOT_AVAILABLE.to_string());
        }

        let record = ContainerRecord {
            id: id.to_string(),
            name: normalize_name(&details.name),
            addresses,
            network_mode: details.network_mode,
        };
        debug!(
            "Resolved {} as {} ({:?}, mode {:?})",
            record.id, record.name, record.addresses, record.network_mode
        );
        Ok(record)
    }
}
