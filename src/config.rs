use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Pi-hole container whose custom list is synchronised. Unset means
    /// report only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pihole: Option<String>,
    /// Where the `.bak` and `.new` copies of the list are written.
    pub output_dir: PathBuf,
    /// Location of the custom list inside the Pi-hole container.
    pub custom_list_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pihole: None,
            output_dir: PathBuf::from("/tmp"),
            custom_list_path: "/etc/pihole/custom.list".into(),
        }
    }
}

impl Config {
    /// Defaults, then `container-hosts.{toml,json}`, then `CONTAINER_HOSTS_*`
    /// variables, then command-line flags.
    pub fn load(cli: &Cli) -> Result<Self, figment::Error> {
        let mut config: Config = Self::figment()
            .merge(Serialized::defaults(cli))
            .extract()?;

        // An empty appliance name means report only.
        config.pihole = config.pihole.filter(|name| !name.is_empty());

        if config.output_dir.as_os_str().is_empty() {
            return Err(figment::Error::from(
                "output_dir must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("container-hosts.toml"))
            .merge(Json::file("container-hosts.json"))
            .merge(Env::prefixed("CONTAINER_HOSTS_"))
    }
}
