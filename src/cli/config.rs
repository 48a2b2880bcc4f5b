use crate::s3::Region;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, fs::File, path::Path};

/// Region signed with when a custom endpoint does not name one
pub const DEFAULT_ENDPOINT_REGION: &str = "us-east-1";

#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct Config {
    pub hosts: BTreeMap<String, Host>,
}

#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct Host {
    pub endpoint: Option<String>,
    pub region: Option<String>,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
}

impl Config {
    /// # Errors
    ///
    /// Will return `Err` if the file can not be read or parsed
    pub fn new(config_path: &Path) -> Result<Self> {
        let file = File::open(config_path)
            .with_context(|| format!("unable to open {}", config_path.display()))?;

        let config: Self =
            serde_yaml_ng::from_reader(file).context("unable to parse config file")?;

        Ok(config)
    }

    /// Get the host from the config.yml
    ///
    /// # Errors
    ///
    /// Will return `Err` if the host is not defined
    pub fn get_host(&self, name: &str) -> Result<&Host> {
        self.hosts
            .get(name)
            .with_context(|| format!("could not find host {name}"))
    }
}

impl Host {
    /// AWS region by name, or the endpoint of an S3 compatible service
    ///
    /// # Errors
    ///
    /// Will return `Err` if neither is usable
    pub fn get_region(&self) -> Result<Region> {
        Ok(match (&self.endpoint, &self.region) {
            (Some(endpoint), region) => Region::Custom {
                name: region
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ENDPOINT_REGION.to_string()),
                endpoint: endpoint.to_string(),
            },
            (None, Some(region)) => region.parse::<Region>()?,
            (None, None) => {
                return Err(anyhow::anyhow!(
                    "could not parse host need an endpoint or region"
                ));
            }
        })
    }
}
