//! Data structures shared across the enumeration pass.
//!
//! A [`ContainerRecord`] is built fresh for every running container and
//! dropped once it has been reported and (optionally) written to the
//! appliance's custom list.

/// Placeholder emitted when no address can be determined.
pub const NOT_AVAILABLE: &str = "N/A";

/// Network mode of containers sharing the host's network namespace.
pub const HOST_NETWORK_MODE: &str = "host";

/// Raw inspection data for one container, as returned by the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerDetails {
    /// Display name exactly as the runtime reports it (usually `/name`).
    pub name: String,
    /// `(network name, address)` pairs ordered by network name.  The
    /// address may be empty for networks without an IPv4 assignment.
    pub networks: Vec<(String, String)>,
    /// The container's network mode, e.g. `bridge` or `host`.
    pub network_mode: Option<String>,
}

/// One line of the report: a container and the addresses it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    /// Display name with leading `/` and spaces stripped.
    pub name: String,
    /// Never empty; falls back to [`NOT_AVAILABLE`].
    pub addresses: Vec<String>,
    pub network_mode: Option<String>,
}

impl ContainerRecord {
    /// The address written to the custom list for this container.
    pub fn primary_address(&self) -> &str {
        self.addresses
            .first()
            .map(String::as_str)
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// Strip the runtime's name decoration: surrounding whitespace, then any
/// leading `/` or space characters.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().trim_start_matches(['/', ' ']).to_string()
}
