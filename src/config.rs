use serde::{Deserialize, Serialize};

/// Main configuration for predserve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote serving configuration
    pub serving: ServingConfig,

    /// Event publication configuration
    pub publish: PublishConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serving: ServingConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

/// Remote serving configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServingConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServingConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Event publication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Enable prediction event publication
    pub enabled: bool,

    /// Stream the prediction events are published to
    pub stream: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stream: "predictions".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.serving.timeout_secs, 30);
        assert!(config.publish.enabled);
        assert_eq!(config.publish.stream, "predictions");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.publish.enabled = false;
        config.publish.stream = "audit".to_string();
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert!(!loaded.publish.enabled);
        assert_eq!(loaded.publish.stream, "audit");
        assert_eq!(loaded.serving.timeout_secs, 30);
    }
}
