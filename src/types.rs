use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pricing strategy produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Api,
    Scraping,
    Community,
    Manual,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Api => "api",
            Source::Scraping => "scraping",
            Source::Community => "community",
            Source::Manual => "manual",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative reliability label attached to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized price result from one pricing source for one (service, country)
/// pair. `price` is non-negative and expressed in `currency` units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub service_name: String,
    pub country_code: String,
    pub currency: String,
    pub price: f64,
    pub plan: String,
    pub source: Source,
    pub confidence: Confidence,
    pub last_updated: DateTime<Utc>,
}

/// A single user-submitted price observation. Reports are simulated in this
/// implementation; the consensus algorithm treats them as if they accrue over
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityReport {
    pub price: f64,
    pub plan: String,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub verified: bool,
}

/// Aggregated result of the community consensus algorithm.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusQuote {
    pub currency: String,
    pub price: f64,
    pub plan: String,
    pub confidence: Confidence,
    pub report_count: usize,
    pub verified_count: usize,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn quote_serializes_with_camel_case_and_lowercase_enums() {
        let quote = PriceQuote {
            service_name: "Netflix".to_string(),
            country_code: "GB".to_string(),
            currency: "GBP".to_string(),
            price: 10.99,
            plan: "Standard".to_string(),
            source: Source::Scraping,
            confidence: Confidence::Medium,
            last_updated: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"serviceName\":\"Netflix\""));
        assert!(json.contains("\"countryCode\":\"GB\""));
        assert!(json.contains("\"source\":\"scraping\""));
        assert!(json.contains("\"confidence\":\"medium\""));
        assert!(json.contains("\"lastUpdated\""));
    }
}
