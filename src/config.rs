use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Runtime configuration. Every section has working defaults so the binary
/// runs without a config file; a YAML file overrides individual fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub resolver: ResolverConfig,
    pub server: ServerConfig,
}

/// Per-source toggle and credential. Credentials never come from the config
/// file; they are filled in once at startup from the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub enabled: bool,
    #[serde(skip)]
    pub credential: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            credential: None,
        }
    }
}

/// Enable/disable flags for the four pricing strategies. Resolution order is
/// fixed: api, scraping, community, manual. The api source additionally needs
/// a credential; without one it stays off regardless of the flag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub api: SourceConfig,
    pub scraping: SourceConfig,
    pub community: SourceConfig,
    pub manual: SourceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Timeout applied to every network-bound adapter call.
    pub adapter_timeout_secs: u64,
    pub cache_ttl_hours: i64,
    /// Sliding-window budget per service, per trailing hour.
    pub rate_limit_per_hour: usize,
    /// Batch shape for refreshing all supported services at once.
    pub batch_size: usize,
    pub batch_delay_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            adapter_timeout_secs: 5,
            cache_ttl_hours: 24,
            rate_limit_per_hour: 20,
            batch_size: 3,
            batch_delay_secs: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl Config {
    /// Load from a YAML file, falling back to defaults when the file does not
    /// exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("config {} not found, using defaults", path.display());
            let config = Config::default();
            config.validate()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.resolver.adapter_timeout_secs == 0 {
            anyhow::bail!("resolver.adapter_timeout_secs must be at least 1");
        }
        if self.resolver.cache_ttl_hours <= 0 {
            anyhow::bail!("resolver.cache_ttl_hours must be positive");
        }
        if self.resolver.rate_limit_per_hour == 0 {
            anyhow::bail!("resolver.rate_limit_per_hour must be at least 1");
        }
        if self.resolver.batch_size == 0 {
            anyhow::bail!("resolver.batch_size must be at least 1");
        }
        Ok(())
    }
}
