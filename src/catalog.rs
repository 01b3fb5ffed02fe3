//! The service catalog: which services support live pricing resolution, their
//! USD base prices for the derived estimate, and the hand-curated fallback
//! table the resolver terminates in.

use crate::types::{Confidence, PriceQuote, Source};
use chrono::{DateTime, Utc};

/// Services supported for live pricing resolution.
pub const SUPPORTED_SERVICES: &[&str] = &[
    "Netflix",
    "Disney+",
    "Spotify",
    "Apple Music",
    "YouTube Premium",
    "Amazon Prime Video",
    "HBO Max",
    "Hulu",
    "Paramount+",
    "Apple TV+",
    "Adobe Creative Cloud",
    "Microsoft 365",
    "iCloud+",
    "Google One",
    "Dropbox",
];

/// USD base prices the exchange-rate estimate works from.
const BASE_USD_PRICES: &[(&str, f64)] = &[
    ("Netflix", 15.49),
    ("Disney+", 7.99),
    ("Spotify", 10.99),
    ("Apple Music", 10.99),
    ("YouTube Premium", 13.99),
    ("Amazon Prime Video", 8.99),
    ("HBO Max", 15.99),
    ("Hulu", 7.99),
    ("Paramount+", 5.99),
    ("Apple TV+", 6.99),
    ("Adobe Creative Cloud", 54.99),
    ("Microsoft 365", 6.99),
    ("iCloud+", 2.99),
    ("Google One", 1.99),
    ("Dropbox", 11.99),
];

/// Catalog base costs for services users commonly track, including ones with
/// no live pricing support. Feeds the offline regional estimate.
const POPULAR_BASE_COSTS: &[(&str, f64)] = &[
    ("Netflix", 15.49),
    ("Disney+", 7.99),
    ("Hulu", 7.99),
    ("HBO Max", 15.99),
    ("Amazon Prime Video", 8.99),
    ("Apple TV+", 6.99),
    ("Paramount+", 5.99),
    ("Peacock", 5.99),
    ("Spotify", 9.99),
    ("Apple Music", 10.99),
    ("YouTube Premium", 11.99),
    ("Planet Fitness", 10.0),
    ("LA Fitness", 29.99),
    ("Peloton", 12.99),
    ("Amazon Prime", 14.99),
    ("Instacart+", 9.99),
    ("iCloud+", 2.99),
    ("Google One", 1.99),
    ("Dropbox", 11.99),
    ("New York Times", 4.25),
    ("Washington Post", 4.0),
    ("ChatGPT Plus", 20.0),
    ("Adobe Creative Cloud", 54.99),
    ("Microsoft 365", 6.99),
];

/// (country, price, currency, plan) rows of the curated fallback table.
type CuratedRow = (&'static str, f64, &'static str, &'static str);

const NETFLIX: &[CuratedRow] = &[
    ("US", 15.49, "USD", "Standard"),
    ("CA", 16.49, "CAD", "Standard"),
    ("GB", 10.99, "GBP", "Standard"),
    ("AU", 16.99, "AUD", "Standard"),
    ("DE", 12.99, "EUR", "Standard"),
    ("FR", 13.49, "EUR", "Standard"),
    ("IT", 12.99, "EUR", "Standard"),
    ("ES", 12.99, "EUR", "Standard"),
    ("NL", 11.99, "EUR", "Standard"),
    ("JP", 1490.0, "JPY", "Standard"),
    ("KR", 13500.0, "KRW", "Standard"),
    ("IN", 649.0, "INR", "Premium"),
    ("BR", 25.9, "BRL", "Standard"),
    ("MX", 219.0, "MXN", "Standard"),
    ("SE", 139.0, "SEK", "Standard"),
    ("NO", 149.0, "NOK", "Standard"),
    ("DK", 119.0, "DKK", "Standard"),
    ("CH", 18.9, "CHF", "Standard"),
    ("PL", 43.0, "PLN", "Standard"),
];

const DISNEY_PLUS: &[CuratedRow] = &[
    ("US", 7.99, "USD", "Basic"),
    ("CA", 11.99, "CAD", "Basic"),
    ("GB", 7.99, "GBP", "Basic"),
    ("AU", 11.99, "AUD", "Basic"),
    ("DE", 8.99, "EUR", "Basic"),
    ("FR", 8.99, "EUR", "Basic"),
    ("IT", 8.99, "EUR", "Basic"),
    ("ES", 8.99, "EUR", "Basic"),
    ("NL", 8.99, "EUR", "Basic"),
    ("JP", 990.0, "JPY", "Basic"),
    ("KR", 9900.0, "KRW", "Basic"),
    ("IN", 299.0, "INR", "Super"),
    ("BR", 27.9, "BRL", "Basic"),
    ("SE", 89.0, "SEK", "Basic"),
    ("NO", 89.0, "NOK", "Basic"),
    ("DK", 69.0, "DKK", "Basic"),
    ("CH", 10.9, "CHF", "Basic"),
    ("PL", 28.99, "PLN", "Basic"),
];

const SPOTIFY: &[CuratedRow] = &[
    ("US", 10.99, "USD", "Individual"),
    ("CA", 10.99, "CAD", "Individual"),
    ("GB", 10.99, "GBP", "Individual"),
    ("AU", 11.99, "AUD", "Individual"),
    ("DE", 9.99, "EUR", "Individual"),
    ("FR", 9.99, "EUR", "Individual"),
    ("IT", 9.99, "EUR", "Individual"),
    ("ES", 9.99, "EUR", "Individual"),
    ("NL", 9.99, "EUR", "Individual"),
    ("JP", 980.0, "JPY", "Individual"),
    ("KR", 10900.0, "KRW", "Individual"),
    ("IN", 119.0, "INR", "Individual"),
    ("BR", 19.9, "BRL", "Individual"),
    ("MX", 115.0, "MXN", "Individual"),
    ("SE", 109.0, "SEK", "Individual"),
    ("NO", 109.0, "NOK", "Individual"),
    ("DK", 99.0, "DKK", "Individual"),
    ("CH", 12.95, "CHF", "Individual"),
    ("PL", 19.99, "PLN", "Individual"),
];

const APPLE_MUSIC: &[CuratedRow] = &[
    ("US", 10.99, "USD", "Individual"),
    ("CA", 10.99, "CAD", "Individual"),
    ("GB", 10.99, "GBP", "Individual"),
    ("AU", 11.99, "AUD", "Individual"),
    ("DE", 10.99, "EUR", "Individual"),
    ("FR", 10.99, "EUR", "Individual"),
    ("IT", 10.99, "EUR", "Individual"),
    ("ES", 10.99, "EUR", "Individual"),
    ("NL", 10.99, "EUR", "Individual"),
    ("JP", 1080.0, "JPY", "Individual"),
    ("KR", 8900.0, "KRW", "Individual"),
    ("IN", 99.0, "INR", "Individual"),
    ("BR", 16.9, "BRL", "Individual"),
    ("MX", 99.0, "MXN", "Individual"),
    ("SE", 109.0, "SEK", "Individual"),
    ("NO", 109.0, "NOK", "Individual"),
    ("DK", 99.0, "DKK", "Individual"),
    ("CH", 12.95, "CHF", "Individual"),
    ("PL", 21.99, "PLN", "Individual"),
];

const YOUTUBE_PREMIUM: &[CuratedRow] = &[
    ("US", 13.99, "USD", "Individual"),
    ("CA", 11.99, "CAD", "Individual"),
    ("GB", 11.99, "GBP", "Individual"),
    ("AU", 14.99, "AUD", "Individual"),
    ("DE", 11.99, "EUR", "Individual"),
    ("FR", 11.99, "EUR", "Individual"),
    ("IT", 11.99, "EUR", "Individual"),
    ("ES", 11.99, "EUR", "Individual"),
    ("NL", 11.99, "EUR", "Individual"),
    ("JP", 1180.0, "JPY", "Individual"),
    ("KR", 8690.0, "KRW", "Individual"),
    ("IN", 129.0, "INR", "Individual"),
    ("BR", 20.9, "BRL", "Individual"),
    ("MX", 99.0, "MXN", "Individual"),
    ("SE", 119.0, "SEK", "Individual"),
    ("NO", 119.0, "NOK", "Individual"),
    ("DK", 109.0, "DKK", "Individual"),
    ("CH", 13.9, "CHF", "Individual"),
    ("PL", 23.99, "PLN", "Individual"),
];

const AMAZON_PRIME_VIDEO: &[CuratedRow] = &[
    ("US", 8.99, "USD", "Video Only"),
    ("CA", 9.99, "CAD", "Video Only"),
    ("GB", 5.99, "GBP", "Video Only"),
    ("AU", 6.99, "AUD", "Video Only"),
    ("DE", 8.99, "EUR", "Video Only"),
    ("FR", 6.99, "EUR", "Video Only"),
    ("IT", 4.99, "EUR", "Video Only"),
    ("ES", 4.99, "EUR", "Video Only"),
    ("NL", 5.99, "EUR", "Video Only"),
    ("JP", 500.0, "JPY", "Video Only"),
    ("IN", 179.0, "INR", "Mobile"),
    ("BR", 14.9, "BRL", "Video Only"),
    ("MX", 69.0, "MXN", "Video Only"),
];

const HBO_MAX: &[CuratedRow] = &[
    ("US", 15.99, "USD", "Ad-Free"),
    ("CA", 19.99, "CAD", "Crave + Movies + HBO"),
    ("MX", 149.0, "MXN", "Estándar"),
    ("BR", 29.9, "BRL", "Mensal"),
    ("AR", 699.0, "ARS", "Mensual"),
];

const HULU: &[CuratedRow] = &[("US", 7.99, "USD", "With Ads")];

const PARAMOUNT_PLUS: &[CuratedRow] = &[
    ("US", 5.99, "USD", "Essential"),
    ("CA", 5.99, "CAD", "Essential"),
    ("GB", 6.99, "GBP", "Standard"),
    ("AU", 8.99, "AUD", "Standard"),
    ("DE", 7.99, "EUR", "Standard"),
    ("FR", 7.99, "EUR", "Standard"),
    ("IT", 7.99, "EUR", "Standard"),
    ("ES", 7.99, "EUR", "Standard"),
    ("NL", 7.99, "EUR", "Standard"),
    ("KR", 4900.0, "KRW", "Standard"),
    ("IN", 699.0, "INR", "Premium"),
    ("BR", 19.9, "BRL", "Paramount+"),
    ("MX", 99.0, "MXN", "Paramount+"),
];

const APPLE_TV_PLUS: &[CuratedRow] = &[
    ("US", 6.99, "USD", "Standard"),
    ("CA", 8.99, "CAD", "Standard"),
    ("GB", 6.99, "GBP", "Standard"),
    ("AU", 9.99, "AUD", "Standard"),
    ("DE", 6.99, "EUR", "Standard"),
    ("FR", 6.99, "EUR", "Standard"),
    ("IT", 6.99, "EUR", "Standard"),
    ("ES", 6.99, "EUR", "Standard"),
    ("NL", 6.99, "EUR", "Standard"),
    ("JP", 900.0, "JPY", "Standard"),
    ("KR", 6500.0, "KRW", "Standard"),
    ("IN", 99.0, "INR", "Standard"),
    ("BR", 9.9, "BRL", "Standard"),
    ("MX", 69.0, "MXN", "Standard"),
];

const ADOBE_CREATIVE_CLOUD: &[CuratedRow] = &[
    ("US", 54.99, "USD", "All Apps"),
    ("CA", 69.99, "CAD", "All Apps"),
    ("GB", 51.98, "GBP", "All Apps"),
    ("AU", 76.99, "AUD", "All Apps"),
    ("DE", 59.49, "EUR", "All Apps"),
    ("FR", 59.99, "EUR", "All Apps"),
    ("IT", 59.99, "EUR", "All Apps"),
    ("ES", 60.49, "EUR", "All Apps"),
    ("NL", 60.49, "EUR", "All Apps"),
    ("JP", 6480.0, "JPY", "All Apps"),
    ("KR", 56000.0, "KRW", "All Apps"),
    ("IN", 1675.6, "INR", "All Apps"),
    ("BR", 85.0, "BRL", "All Apps"),
    ("MX", 899.0, "MXN", "All Apps"),
];

const MICROSOFT_365: &[CuratedRow] = &[
    ("US", 6.99, "USD", "Personal"),
    ("CA", 8.99, "CAD", "Personal"),
    ("GB", 5.99, "GBP", "Personal"),
    ("AU", 10.0, "AUD", "Personal"),
    ("DE", 7.0, "EUR", "Personal"),
    ("FR", 7.0, "EUR", "Personal"),
    ("IT", 7.0, "EUR", "Personal"),
    ("ES", 7.0, "EUR", "Personal"),
    ("NL", 7.0, "EUR", "Personal"),
    ("JP", 1284.0, "JPY", "Personal"),
    ("KR", 8900.0, "KRW", "Personal"),
    ("IN", 489.0, "INR", "Personal"),
    ("BR", 25.0, "BRL", "Personal"),
    ("MX", 139.0, "MXN", "Personal"),
];

const ICLOUD_PLUS: &[CuratedRow] = &[
    ("US", 2.99, "USD", "50GB"),
    ("CA", 3.99, "CAD", "50GB"),
    ("GB", 2.49, "GBP", "50GB"),
    ("AU", 4.49, "AUD", "50GB"),
    ("DE", 2.99, "EUR", "50GB"),
    ("FR", 2.99, "EUR", "50GB"),
    ("IT", 2.99, "EUR", "50GB"),
    ("ES", 2.99, "EUR", "50GB"),
    ("NL", 2.99, "EUR", "50GB"),
    ("JP", 400.0, "JPY", "50GB"),
    ("KR", 1100.0, "KRW", "50GB"),
    ("IN", 75.0, "INR", "50GB"),
    ("BR", 3.5, "BRL", "50GB"),
    ("MX", 17.0, "MXN", "50GB"),
];

const GOOGLE_ONE: &[CuratedRow] = &[
    ("US", 1.99, "USD", "100GB"),
    ("CA", 2.79, "CAD", "100GB"),
    ("GB", 1.59, "GBP", "100GB"),
    ("AU", 2.49, "AUD", "100GB"),
    ("DE", 1.99, "EUR", "100GB"),
    ("FR", 1.99, "EUR", "100GB"),
    ("IT", 1.99, "EUR", "100GB"),
    ("ES", 1.99, "EUR", "100GB"),
    ("NL", 1.99, "EUR", "100GB"),
    ("JP", 250.0, "JPY", "100GB"),
    ("KR", 2200.0, "KRW", "100GB"),
    ("IN", 130.0, "INR", "100GB"),
    ("BR", 6.5, "BRL", "100GB"),
    ("MX", 39.0, "MXN", "100GB"),
];

const DROPBOX: &[CuratedRow] = &[
    ("US", 11.99, "USD", "Plus"),
    ("CA", 14.99, "CAD", "Plus"),
    ("GB", 9.99, "GBP", "Plus"),
    ("AU", 15.0, "AUD", "Plus"),
    ("DE", 11.99, "EUR", "Plus"),
    ("FR", 11.99, "EUR", "Plus"),
    ("IT", 11.99, "EUR", "Plus"),
    ("ES", 11.99, "EUR", "Plus"),
    ("NL", 11.99, "EUR", "Plus"),
    ("JP", 1500.0, "JPY", "Plus"),
    ("KR", 12000.0, "KRW", "Plus"),
    ("IN", 830.0, "INR", "Plus"),
    ("BR", 21.5, "BRL", "Plus"),
    ("MX", 169.0, "MXN", "Plus"),
];

const CURATED: &[(&str, &[CuratedRow])] = &[
    ("Netflix", NETFLIX),
    ("Disney+", DISNEY_PLUS),
    ("Spotify", SPOTIFY),
    ("Apple Music", APPLE_MUSIC),
    ("YouTube Premium", YOUTUBE_PREMIUM),
    ("Amazon Prime Video", AMAZON_PRIME_VIDEO),
    ("HBO Max", HBO_MAX),
    ("Hulu", HULU),
    ("Paramount+", PARAMOUNT_PLUS),
    ("Apple TV+", APPLE_TV_PLUS),
    ("Adobe Creative Cloud", ADOBE_CREATIVE_CLOUD),
    ("Microsoft 365", MICROSOFT_365),
    ("iCloud+", ICLOUD_PLUS),
    ("Google One", GOOGLE_ONE),
    ("Dropbox", DROPBOX),
];

pub fn is_supported(service: &str) -> bool {
    SUPPORTED_SERVICES.contains(&service)
}

pub fn supported_services() -> &'static [&'static str] {
    SUPPORTED_SERVICES
}

/// USD base price used by the exchange-rate estimate; absent for services
/// without live pricing support.
pub fn base_usd_price(service: &str) -> Option<f64> {
    BASE_USD_PRICES
        .iter()
        .find(|(name, _)| *name == service)
        .map(|(_, price)| *price)
}

/// Catalog base cost (USD) for the offline regional estimate; covers more
/// services than live resolution does.
pub fn popular_base_cost(service: &str) -> Option<f64> {
    POPULAR_BASE_COSTS
        .iter()
        .find(|(name, _)| *name == service)
        .map(|(_, cost)| *cost)
}

/// Curated (price, currency, plan) for an exact (service, country) pair.
pub fn curated_entry(service: &str, country: &str) -> Option<(f64, &'static str, &'static str)> {
    let (_, rows) = CURATED.iter().find(|(name, _)| *name == service)?;
    rows.iter()
        .find(|(c, _, _, _)| *c == country)
        .map(|(_, price, currency, plan)| (*price, *currency, *plan))
}

/// The unconditional fallback: exact country entry, then the service's US
/// entry, then a global default. Never fails.
pub fn curated_quote(service: &str, country: &str, now: DateTime<Utc>) -> PriceQuote {
    let (price, currency, plan) = curated_entry(service, country)
        .or_else(|| curated_entry(service, "US"))
        .unwrap_or((9.99, "USD", "Standard"));

    PriceQuote {
        service_name: service.to_string(),
        country_code: country.to_string(),
        currency: currency.to_string(),
        price,
        plan: plan.to_string(),
        source: Source::Manual,
        confidence: Confidence::Medium,
        last_updated: now,
    }
}
