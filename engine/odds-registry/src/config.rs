//! Configuration for the odds registry

use crate::error::{RegistryError, Result};
use crate::types::ConfigSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Box configuration catalog shared by every product
    pub configs: BTreeMap<String, ConfigSpec>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { configs: default_configs() }
    }
}

/// The standard box catalog
pub fn default_configs() -> BTreeMap<String, ConfigSpec> {
    [
        ("hobby", ConfigSpec::new("Hobby Box", 20, 4)),
        ("jumbo", ConfigSpec::new("Jumbo Box", 12, 13)),
        ("breaker", ConfigSpec::new("Breaker Box", 10, 20)),
        ("value", ConfigSpec::new("Value Box", 6, 6)),
        ("hanger", ConfigSpec::new("Hanger Box", 1, 30)),
        ("mega", ConfigSpec::new("Mega Box", 7, 5)),
    ]
    .into_iter()
    .map(|(key, spec)| (key.to_string(), spec))
    .collect()
}

impl RegistryConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: RegistryConfig =
            toml::from_str(content).map_err(|e| RegistryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RegistryError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Every box must hold at least one card
    pub fn validate(&self) -> Result<()> {
        for (key, spec) in &self.configs {
            if spec.packs == 0 || spec.cards_per_pack == 0 {
                return Err(RegistryError::Config(format!(
                    "config '{key}' must have packs > 0 and cardsPerPack > 0"
                )));
            }
        }
        Ok(())
    }
}
