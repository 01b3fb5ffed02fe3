pub mod api;
pub mod community;
pub mod manual;
pub mod scraping;

use crate::config::SourcesConfig;
use crate::types::PriceQuote;
use anyhow::Result;
use async_trait::async_trait;

/// One pricing strategy. `Ok(None)` means the source has no data for the
/// pair; `Err` means the source itself failed. The resolver treats both the
/// same way and moves on to the next source.
#[async_trait]
pub trait PricingSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, service: &str, country: &str) -> Result<Option<PriceQuote>>;
}

/// Enabled sources in resolution order: api, scraping, community, manual.
pub struct SourceRegistry {
    sources: Vec<Box<dyn PricingSource>>,
}

impl SourceRegistry {
    pub fn new(client: reqwest::Client, config: &SourcesConfig) -> Self {
        let mut sources: Vec<Box<dyn PricingSource>> = Vec::new();

        if config.api.enabled {
            if let Some(key) = config.api.credential.clone() {
                sources.push(Box::new(api::ApiSource::new(client.clone(), key)));
            } else {
                tracing::warn!("live pricing API credential not set; api source disabled");
            }
        }

        if config.scraping.enabled {
            sources.push(Box::new(scraping::ScrapingSource::new(client)));
        }

        if config.community.enabled {
            sources.push(Box::new(community::CommunitySource::new()));
        }

        if config.manual.enabled {
            sources.push(Box::new(manual::ManualSource::new()));
        }

        Self { sources }
    }

    #[cfg(test)]
    pub(crate) fn with_sources(sources: Vec<Box<dyn PricingSource>>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[Box<dyn PricingSource>] {
        &self.sources
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}
