//! HTTP API over the resolver, the scraping estimate, and the community
//! report board.

use crate::catalog;
use crate::clock::Clock;
use crate::consensus::ReportBoard;
use crate::resolver::PricingResolver;
use crate::sources::scraping::ScrapingSource;
use crate::sources::PricingSource;
use crate::types::{Confidence, ConsensusQuote, PriceQuote};
use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<PricingResolver>,
    pub board: Arc<ReportBoard>,
    pub scraper: Arc<ScrapingSource>,
    pub clock: Arc<dyn Clock>,
}

#[derive(Deserialize)]
struct PricingParams {
    service: Option<String>,
    country: Option<String>,
}

#[derive(Deserialize)]
struct CountryParams {
    country: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// Wire shape of the scrape-pricing endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteBody {
    currency: String,
    price: f64,
    plan: String,
    confidence: Confidence,
    last_updated: DateTime<Utc>,
}

impl From<PriceQuote> for QuoteBody {
    fn from(quote: PriceQuote) -> Self {
        Self {
            currency: quote.currency,
            price: quote.price,
            plan: quote.plan,
            confidence: quote.confidence,
            last_updated: quote.last_updated,
        }
    }
}

/// GET /api/pricing?service=&country= - full layered resolution.
async fn get_pricing(
    State(state): State<AppState>,
    Query(params): Query<PricingParams>,
) -> Result<Json<PriceQuote>, ApiError> {
    let Some(service) = params.service else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Service parameter required",
        ));
    };
    let country = params.country.unwrap_or_else(|| "US".to_string());

    match state.resolver.resolve(&service, &country).await {
        Some(quote) => Ok(Json(quote)),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            "Service not supported for live pricing",
        )),
    }
}

/// GET /api/scrape-pricing?service=&country= - the exchange-rate estimate,
/// with the curated table standing in when the rate fetch fails.
async fn get_scrape_pricing(
    State(state): State<AppState>,
    Query(params): Query<PricingParams>,
) -> Result<Json<QuoteBody>, ApiError> {
    let Some(service) = params.service else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Service parameter required",
        ));
    };
    let country = params.country.unwrap_or_else(|| "US".to_string());

    match state.scraper.fetch(&service, &country).await {
        Ok(Some(quote)) => Ok(Json(QuoteBody::from(quote))),
        Ok(None) => Err(api_error(StatusCode::NOT_FOUND, "Pricing not found")),
        Err(e) => {
            warn!("scraping estimate failed for {}/{}: {:#}", service, country, e);
            let entry = catalog::curated_entry(&service, &country)
                .or_else(|| catalog::curated_entry(&service, "US"));
            match entry {
                Some((price, currency, plan)) => Ok(Json(QuoteBody {
                    currency: currency.to_string(),
                    price,
                    plan: plan.to_string(),
                    confidence: Confidence::Medium,
                    last_updated: state.clock.now(),
                })),
                None => Err(api_error(StatusCode::NOT_FOUND, "Pricing not found")),
            }
        }
    }
}

/// GET /api/community-pricing?service=&country= - consensus over recent
/// community reports.
async fn get_community_pricing(
    State(state): State<AppState>,
    Query(params): Query<PricingParams>,
) -> Result<Json<ConsensusQuote>, ApiError> {
    let Some(service) = params.service else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Service parameter required",
        ));
    };
    let country = params.country.unwrap_or_else(|| "US".to_string());

    match state.board.consensus(&service, &country) {
        Some(consensus) => Ok(Json(consensus)),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            "No community pricing found",
        )),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitReport {
    service: String,
    country: String,
    price: f64,
    plan: Option<String>,
    user_token: Option<String>,
}

#[derive(Serialize)]
struct SubmitAck {
    success: bool,
    message: &'static str,
    note: &'static str,
}

/// POST /api/community-pricing - acknowledge a submission. Nothing is stored;
/// moderation and persistence come with a real report database.
async fn post_community_pricing(Json(report): Json<SubmitReport>) -> Json<SubmitAck> {
    info!(
        "community pricing submitted: {} in {} = {} ({})",
        report.service,
        report.country,
        report.price,
        report.plan.as_deref().unwrap_or("Standard")
    );
    debug!("submission token present: {}", report.user_token.is_some());

    Json(SubmitAck {
        success: true,
        message: "Pricing submitted for review",
        note: "Submissions are not persisted yet",
    })
}

/// GET /api/netflix-pricing?country= - single curated Netflix quote.
async fn get_netflix_pricing(
    State(state): State<AppState>,
    Query(params): Query<CountryParams>,
) -> Json<PriceQuote> {
    let country = params.country.unwrap_or_else(|| "US".to_string());
    Json(catalog::curated_quote("Netflix", &country, state.clock.now()))
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/pricing", get(get_pricing))
        .route("/api/scrape-pricing", get(get_scrape_pricing))
        .route(
            "/api/community-pricing",
            get(get_community_pricing).post(post_community_pricing),
        )
        .route("/api/netflix-pricing", get(get_netflix_pricing))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("pricing API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, router(state))
        .await
        .context("serving pricing API")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::clock::SystemClock;
    use crate::config::{ResolverConfig, SourcesConfig};
    use crate::sources::SourceRegistry;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        // Keep tests off the network: only the static community and manual
        // sources are registered.
        let mut sources = SourcesConfig::default();
        sources.scraping.enabled = false;

        let client = reqwest::Client::new();
        let registry = SourceRegistry::new(client.clone(), &sources);
        let resolver = PricingResolver::new(
            registry,
            Box::new(MemoryStore::new()),
            clock.clone(),
            &ResolverConfig::default(),
        );

        AppState {
            resolver: Arc::new(resolver),
            board: Arc::new(ReportBoard::simulated(clock.clone())),
            scraper: Arc::new(ScrapingSource::new(client)),
            clock,
        }
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn missing_service_parameter_is_a_bad_request() {
        for uri in [
            "/api/pricing",
            "/api/scrape-pricing?country=GB",
            "/api/community-pricing",
        ] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["error"], "Service parameter required");
        }
    }

    #[tokio::test]
    async fn pricing_resolves_through_the_layered_sources() {
        let (status, body) = get_json("/api/pricing?service=Netflix&country=US").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["serviceName"], "Netflix");
        assert_eq!(body["price"], 15.49);
        // With the network sources off, the static community table wins.
        assert_eq!(body["source"], "community");
    }

    #[tokio::test]
    async fn unsupported_service_is_not_found() {
        let (status, body) = get_json("/api/pricing?service=SomeRandomGym&country=US").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Service not supported for live pricing");
    }

    #[tokio::test]
    async fn community_consensus_reports_counts_and_confidence() {
        let (status, body) = get_json("/api/community-pricing?service=Netflix&country=US").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 15.49);
        assert_eq!(body["reportCount"], 2);
        assert_eq!(body["verifiedCount"], 2);
        assert_eq!(body["confidence"], "medium");
        assert_eq!(body["currency"], "USD");
    }

    #[tokio::test]
    async fn community_consensus_without_reports_is_not_found() {
        let (status, body) = get_json("/api/community-pricing?service=Hulu").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No community pricing found");
    }

    #[tokio::test]
    async fn netflix_pricing_defaults_to_the_us_and_respects_country() {
        let (status, body) = get_json("/api/netflix-pricing").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 15.49);
        assert_eq!(body["currency"], "USD");

        let (_, body) = get_json("/api/netflix-pricing?country=DE").await;
        assert_eq!(body["price"], 12.99);
        assert_eq!(body["currency"], "EUR");
    }

    #[tokio::test]
    async fn submissions_are_acknowledged_but_not_stored() {
        let payload = serde_json::json!({
            "service": "Netflix",
            "country": "US",
            "price": 15.49,
            "plan": "Standard",
            "userToken": "tok_123",
        });
        let response = router(test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/community-pricing")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);

        // The board still has exactly the simulated reports.
        let (status, _) = get_json("/api/community-pricing?service=Netflix&country=JP").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
