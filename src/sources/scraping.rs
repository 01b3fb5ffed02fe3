use super::PricingSource;
use crate::catalog;
use crate::regional;
use crate::types::{Confidence, PriceQuote, Source};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;

const EXCHANGE_RATE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// Exchange-rate-derived estimate: a live USD rate table applied to the
/// service's USD base price and regional multiplier. No actual page scraping
/// happens; the name is inherited from the strategy it stands in for.
pub struct ScrapingSource {
    client: reqwest::Client,
}

impl ScrapingSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PricingSource for ScrapingSource {
    fn name(&self) -> &'static str {
        "scraping"
    }

    async fn fetch(&self, service: &str, country: &str) -> Result<Option<PriceQuote>> {
        let Some(base_price) = catalog::base_usd_price(service) else {
            return Ok(None);
        };

        let resp = self
            .client
            .get(EXCHANGE_RATE_URL)
            .send()
            .await
            .context("exchange rate request failed")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("exchange rate API HTTP {}", status);
        }

        let body: serde_json::Value = resp.json().await.context("exchange rate parse failed")?;

        let target_currency = regional::currency_for_country(country);
        let rate = body["rates"][target_currency].as_f64().unwrap_or(1.0);

        let multiplier = regional::regional_multiplier(service, country);
        let adjusted = base_price * multiplier * rate;
        let price = regional::round_for_currency(adjusted, target_currency);

        Ok(Some(PriceQuote {
            service_name: service.to_string(),
            country_code: country.to_string(),
            currency: target_currency.to_string(),
            price,
            plan: "Standard".to_string(),
            source: Source::Scraping,
            confidence: Confidence::Medium,
            last_updated: Utc::now(),
        }))
    }
}
