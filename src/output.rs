use crate::regional;
use crate::types::PriceQuote;
use anyhow::{Context, Result};

pub fn print_table(quotes: &[PriceQuote]) {
    println!(
        "\n{:<22} {:<8} {:<14} {:<10} {:<22} {:<10} {}",
        "Service", "Country", "Price", "Currency", "Plan", "Source", "Confidence"
    );
    println!("{}", "-".repeat(100));
    for quote in quotes {
        let formatted = regional::format_currency(
            quote.price,
            &quote.currency,
            regional::currency_symbol(&quote.currency),
        );
        println!(
            "{:<22} {:<8} {:<14} {:<10} {:<22} {:<10} {}",
            regional::localized_service_name(&quote.service_name, &quote.country_code),
            quote.country_code,
            formatted,
            quote.currency,
            quote.plan,
            quote.source,
            quote.confidence
        );
    }
    println!();
}

pub fn print_json(quotes: &[PriceQuote]) -> Result<()> {
    let json = serde_json::to_string_pretty(quotes).context("serializing quotes")?;
    println!("{}", json);
    Ok(())
}
