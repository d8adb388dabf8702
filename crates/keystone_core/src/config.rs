//! # World Configuration
//!
//! Sizing hints for a [`World`](crate::World), loaded once at startup.
//!
//! ```toml
//! entity_capacity = 4096
//! component_capacity = 16
//! system_capacity = 8
//! warn_on_duplicate_component = false
//! ```
//!
//! Every key is optional; missing keys take their default.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Pre-allocation and diagnostics settings for a world.
///
/// Capacities are reservations, not limits: every table still grows on
/// demand past them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Entity slots reserved in the id pool, storage and activation table.
    pub entity_capacity: usize,
    /// Component type slots reserved per entity row.
    pub component_capacity: usize,
    /// System registrations reserved.
    pub system_capacity: usize,
    /// Log a warning when `add_component` discards a duplicate.
    pub warn_on_duplicate_component: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            entity_capacity: 1024,
            component_capacity: 32,
            system_capacity: 16,
            warn_on_duplicate_component: true,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] for zero capacities.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`WorldConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that every capacity is non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacities = [
            ("entity_capacity", self.entity_capacity),
            ("component_capacity", self.component_capacity),
            ("system_capacity", self.system_capacity),
        ];
        for (key, value) in capacities {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{key} must be greater than zero")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = WorldConfig::from_toml_str("").unwrap();
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = WorldConfig::from_toml_str(
            "entity_capacity = 10\nwarn_on_duplicate_component = false\n",
        )
        .unwrap();
        assert_eq!(config.entity_capacity, 10);
        assert_eq!(config.component_capacity, 32);
        assert!(!config.warn_on_duplicate_component);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = WorldConfig::from_toml_str("system_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("system_capacity")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = WorldConfig::from_toml_str("max_worlds = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "component_capacity = 8").unwrap();

        let config = WorldConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.component_capacity, 8);
    }

    #[test]
    fn test_missing_file() {
        let err = WorldConfig::from_toml_file("/nonexistent/keystone.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
