//! Static currency and regional-pricing tables, plus the conversion and
//! formatting rules built on top of them. Hand-curated, never mutated at
//! runtime.

/// Units of foreign currency per USD. Unknown currencies convert at 1.0.
const EXCHANGE_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("CAD", 1.35),
    ("GBP", 0.79),
    ("EUR", 0.92),
    ("AUD", 1.52),
    ("JPY", 149.0),
    ("KRW", 1320.0),
    ("INR", 83.0),
    ("BRL", 5.0),
    ("MXN", 17.0),
    ("SEK", 10.5),
    ("NOK", 10.8),
    ("DKK", 6.9),
    ("CHF", 0.88),
    ("PLN", 4.0),
    ("CZK", 22.5),
    ("HUF", 360.0),
    ("RON", 4.6),
    ("BGN", 1.8),
];

const COUNTRY_CURRENCIES: &[(&str, &str)] = &[
    ("US", "USD"),
    ("CA", "CAD"),
    ("GB", "GBP"),
    ("AU", "AUD"),
    ("DE", "EUR"),
    ("FR", "EUR"),
    ("IT", "EUR"),
    ("ES", "EUR"),
    ("NL", "EUR"),
    ("JP", "JPY"),
    ("KR", "KRW"),
    ("IN", "INR"),
    ("BR", "BRL"),
    ("MX", "MXN"),
    ("SE", "SEK"),
    ("NO", "NOK"),
    ("DK", "DKK"),
    ("CH", "CHF"),
    ("PL", "PLN"),
    ("CZ", "CZK"),
    ("HU", "HUF"),
    ("RO", "RON"),
    ("BG", "BGN"),
];

const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("CAD", "C$"),
    ("GBP", "£"),
    ("EUR", "€"),
    ("AUD", "A$"),
    ("JPY", "¥"),
    ("KRW", "₩"),
    ("INR", "₹"),
    ("BRL", "R$"),
    ("MXN", "MX$"),
    ("SEK", "kr"),
    ("NOK", "kr"),
    ("DKK", "kr"),
    ("CHF", "CHF"),
    ("PLN", "zł"),
    ("CZK", "Kč"),
    ("HUF", "Ft"),
    ("RON", "lei"),
    ("BGN", "лв"),
];

/// Per-service, per-country scalars applied to a USD base price to
/// approximate local market pricing before currency conversion.
const NETFLIX_MULTIPLIERS: &[(&str, f64)] = &[
    ("US", 1.0),
    ("CA", 0.95),
    ("GB", 1.1),
    ("AU", 0.85),
    ("DE", 0.9),
    ("FR", 0.9),
    ("IT", 0.85),
    ("ES", 0.8),
    ("NL", 0.9),
    ("JP", 0.7),
    ("KR", 0.6),
    ("IN", 0.3),
    ("BR", 0.4),
    ("MX", 0.5),
    ("SE", 1.0),
    ("NO", 1.2),
    ("DK", 1.1),
    ("CH", 1.3),
    ("PL", 0.6),
    ("CZ", 0.5),
    ("HU", 0.5),
    ("RO", 0.4),
    ("BG", 0.4),
];

const DISNEY_PLUS_MULTIPLIERS: &[(&str, f64)] = &[
    ("US", 1.0),
    ("CA", 0.95),
    ("GB", 1.0),
    ("AU", 0.9),
    ("DE", 0.85),
    ("FR", 0.85),
    ("IT", 0.8),
    ("ES", 0.8),
    ("NL", 0.85),
    ("JP", 0.8),
    ("KR", 0.7),
    ("IN", 0.4),
    ("BR", 0.5),
    ("SE", 0.9),
    ("NO", 1.0),
    ("DK", 0.95),
    ("CH", 1.1),
    ("PL", 0.6),
    ("CZ", 0.5),
    ("HU", 0.5),
    ("RO", 0.4),
    ("BG", 0.4),
];

const SPOTIFY_MULTIPLIERS: &[(&str, f64)] = &[
    ("US", 1.0),
    ("CA", 0.95),
    ("GB", 1.0),
    ("AU", 0.9),
    ("DE", 1.0),
    ("FR", 1.0),
    ("IT", 1.0),
    ("ES", 1.0),
    ("NL", 1.0),
    ("JP", 0.8),
    ("KR", 0.6),
    ("IN", 0.15),
    ("BR", 0.3),
    ("MX", 0.4),
    ("SE", 1.0),
    ("NO", 1.1),
    ("DK", 1.0),
    ("CH", 1.2),
    ("PL", 0.5),
    ("CZ", 0.4),
    ("HU", 0.4),
    ("RO", 0.3),
    ("BG", 0.3),
];

const APPLE_MUSIC_MULTIPLIERS: &[(&str, f64)] = &[
    ("US", 1.0),
    ("CA", 0.95),
    ("GB", 1.0),
    ("AU", 0.9),
    ("DE", 1.0),
    ("FR", 1.0),
    ("IT", 1.0),
    ("ES", 1.0),
    ("NL", 1.0),
    ("JP", 0.8),
    ("KR", 0.6),
    ("IN", 0.12),
    ("BR", 0.25),
    ("MX", 0.35),
    ("SE", 1.0),
    ("NO", 1.1),
    ("DK", 1.0),
    ("CH", 1.2),
    ("PL", 0.5),
];

const YOUTUBE_PREMIUM_MULTIPLIERS: &[(&str, f64)] = &[
    ("US", 1.0),
    ("CA", 0.85),
    ("GB", 0.85),
    ("AU", 1.05),
    ("DE", 0.85),
    ("FR", 0.85),
    ("IT", 0.85),
    ("ES", 0.85),
    ("NL", 0.85),
    ("JP", 0.7),
    ("KR", 0.5),
    ("IN", 0.12),
    ("BR", 0.25),
    ("MX", 0.35),
    ("SE", 0.85),
    ("NO", 0.85),
    ("DK", 0.8),
    ("CH", 1.0),
    ("PL", 0.4),
];

const REGIONAL_MULTIPLIERS: &[(&str, &[(&str, f64)])] = &[
    ("Netflix", NETFLIX_MULTIPLIERS),
    ("Disney+", DISNEY_PLUS_MULTIPLIERS),
    ("Spotify", SPOTIFY_MULTIPLIERS),
    ("Apple Music", APPLE_MUSIC_MULTIPLIERS),
    ("YouTube Premium", YOUTUBE_PREMIUM_MULTIPLIERS),
];

/// Region-locked services whose canonical base price is quoted in a non-USD
/// currency; conversion goes through that currency instead of assuming USD.
const AUSTRALIAN_SERVICES: &[&str] = &[
    "Stan",
    "Foxtel Now",
    "Binge",
    "Kayo Sports",
    "ABC iview",
    "SBS On Demand",
    "7plus",
    "9Now",
    "10 play",
];

const UK_SERVICES: &[&str] = &[
    "BBC iPlayer",
    "ITV Hub",
    "All 4",
    "My5",
    "Sky Go",
    "NOW TV",
];

/// Currencies conventionally quoted without decimal places.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW", "HUF"];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Units of `currency` per USD; 1.0 for unknown currencies.
pub fn exchange_rate(currency: &str) -> f64 {
    lookup(EXCHANGE_RATES, currency).unwrap_or(1.0)
}

/// ISO 4217 currency for an ISO 3166-1 alpha-2 country; USD for unmapped
/// countries.
pub fn currency_for_country(country: &str) -> &'static str {
    lookup(COUNTRY_CURRENCIES, country).unwrap_or("USD")
}

pub fn currency_symbol(currency: &str) -> &'static str {
    lookup(CURRENCY_SYMBOLS, currency).unwrap_or("$")
}

pub fn currency_name(currency: &str) -> &'static str {
    match currency {
        "USD" => "US Dollar",
        "CAD" => "Canadian Dollar",
        "GBP" => "British Pound",
        "EUR" => "Euro",
        "AUD" => "Australian Dollar",
        "JPY" => "Japanese Yen",
        "KRW" => "South Korean Won",
        "INR" => "Indian Rupee",
        "BRL" => "Brazilian Real",
        "MXN" => "Mexican Peso",
        "SEK" => "Swedish Krona",
        "NOK" => "Norwegian Krone",
        "DKK" => "Danish Krone",
        "CHF" => "Swiss Franc",
        "PLN" => "Polish Zloty",
        "CZK" => "Czech Koruna",
        "HUF" => "Hungarian Forint",
        "RON" => "Romanian Leu",
        "BGN" => "Bulgarian Lev",
        _ => "Unknown Currency",
    }
}

/// Per-service regional multiplier, defaulting to 1.0 when either the service
/// or the country has no entry.
pub fn regional_multiplier(service: &str, country: &str) -> f64 {
    REGIONAL_MULTIPLIERS
        .iter()
        .find(|(name, _)| *name == service)
        .and_then(|(_, table)| lookup(table, country))
        .unwrap_or(1.0)
}

/// Native base currency for region-locked services in their home market.
fn native_currency(service: &str, country: &str) -> Option<&'static str> {
    if country == "AU" && AUSTRALIAN_SERVICES.contains(&service) {
        return Some("AUD");
    }
    if country == "GB" && UK_SERVICES.contains(&service) {
        return Some("GBP");
    }
    None
}

/// Convert a USD amount into the target currency via the static rate table.
pub fn convert_price(usd_amount: f64, target_currency: &str) -> f64 {
    usd_amount * exchange_rate(target_currency)
}

/// Localize a service's base price for a country. Services priced natively in
/// AUD or GBP convert through their home currency; everything else applies
/// the regional multiplier to a USD base and converts.
pub fn regional_price(
    service: &str,
    base_price: f64,
    country: &str,
    target_currency: &str,
) -> f64 {
    if let Some(native) = native_currency(service, country) {
        if target_currency == native {
            return base_price;
        }
        let usd_price = base_price / exchange_rate(native);
        return convert_price(usd_price, target_currency);
    }

    let adjusted = base_price * regional_multiplier(service, country);
    convert_price(adjusted, target_currency)
}

/// Round to the precision the currency is conventionally quoted in.
pub fn round_for_currency(amount: f64, currency: &str) -> f64 {
    if ZERO_DECIMAL_CURRENCIES.contains(&currency) {
        amount.round()
    } else {
        (amount * 100.0).round() / 100.0
    }
}

fn group_digits(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Currency-family-specific display rules: no decimals with digit grouping
/// for JPY/KRW/HUF, symbol after the amount for Nordic and several Eastern
/// European currencies, symbol before the amount otherwise.
pub fn format_currency(amount: f64, currency: &str, symbol: &str) -> String {
    match currency {
        "JPY" | "KRW" => format!("{}{}", symbol, group_digits(amount.round() as i64)),
        "HUF" => format!("{} {}", group_digits(amount.round() as i64), symbol),
        "CZK" | "PLN" | "RON" | "BGN" | "SEK" | "NOK" | "DKK" => {
            format!("{:.2} {}", amount, symbol)
        }
        _ => format!("{}{:.2}", symbol, amount),
    }
}

/// Market-specific branding for services that operate under different names.
pub fn localized_service_name<'a>(service: &'a str, country: &str) -> &'a str {
    match (service, country) {
        ("HBO Max", "US") => "Max",
        ("HBO Max", "CA") => "Crave",
        ("HBO Max", "GB") => "Sky Atlantic",
        ("HBO Max", "AU") => "Binge",
        ("Hulu", "JP") => "Hulu Japan",
        _ => service,
    }
}
