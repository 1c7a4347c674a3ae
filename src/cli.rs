use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

/// List running Docker containers and their IP addresses, optionally adding
/// them to a Pi-hole container's custom.list.
///
/// Flags left unset fall back to `container-hosts.toml`,
/// `container-hosts.json` and `CONTAINER_HOSTS_*` environment variables.
#[derive(Debug, Parser, Serialize)]
#[command(name = "container-hosts", version, about)]
pub struct Cli {
    /// Name of the Pi-hole container to append to custom.list
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pihole: Option<String>,

    /// Directory to save the custom.list files [default: /tmp]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Path of custom.list inside the Pi-hole container
    /// [default: /etc/pihole/custom.list]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_list_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "container-hosts",
            "--pihole",
            "pihole1",
            "--output-dir",
            "/srv/lists",
        ]);
        assert_eq!(cli.pihole.as_deref(), Some("pihole1"));
        assert_eq!(cli.output_dir, Some(PathBuf::from("/srv/lists")));
        assert_eq!(cli.custom_list_path, None);
    }

    #[test]
    fn test_flags_are_optional() {
        let cli = Cli::parse_from(["container-hosts"]);
        assert!(cli.pihole.is_none());
        assert!(cli.output_dir.is_none());
    }
}
