//! vpsval CLI
//!
//! Values the unused term of a prepaid VPS subscription and compares it with
//! an asking price.

mod args;
mod exchange_api;
mod rate_store;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, Utc};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vpsval_core::currency::{
    RateBook, RateCache, RateOrigin, RateProvider, StaticRateProvider,
};
use vpsval_core::valuation::{
    Valuation, ValuationInput, ValuationService, render_markdown, render_text,
};
use vpsval_shared::{AppConfig, AppError, AppResult, Currency};

use crate::args::{Cli, OutputFormat};
use crate::exchange_api::HttpRateProvider;
use crate::rate_store::{RateStore, is_fresh};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "vpsval=info".into()),
    );
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if cli.log_json {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer).init();
    }

    let config = AppConfig::load().context("Failed to load configuration")?;

    match run(&cli, &config) {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(err) => {
            eprintln!("{}: {err}", err.error_code());
            std::process::exit(err.exit_code());
        }
    }
}

fn run(cli: &Cli, config: &AppConfig) -> AppResult<String> {
    let input = build_input(cli, config)?;
    let valuation = match cli.rate {
        Some(_) => ValuationService::evaluate(&input)?,
        None if input.currency == input.reference_currency => {
            ValuationService::evaluate(&input)?
        }
        None => {
            let book = resolve_rates(config, input.reference_currency)?;
            if !book.quotes(input.currency) {
                warn!(
                    currency = %input.currency,
                    reference = %input.reference_currency,
                    "No exchange rate known, converting at 1"
                );
            }
            ValuationService::evaluate_with_rates(&input, &book)?
        }
    };
    render(&valuation, cli.format)
}

/// Validates the arguments and fills in defaults.
fn build_input(cli: &Cli, config: &AppConfig) -> AppResult<ValuationInput> {
    if cli.price < Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "price must not be negative, got {}",
            cli.price
        )));
    }
    if cli.transaction_price < Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "transaction price must not be negative, got {}",
            cli.transaction_price
        )));
    }
    if let Some(rate) = cli.rate
        && rate <= Decimal::ZERO
    {
        return Err(AppError::Validation(format!(
            "exchange rate must be positive, got {rate}"
        )));
    }

    let reference_currency = cli.reference_currency.unwrap_or(config.reference_currency);
    Ok(ValuationInput {
        transaction_date: cli
            .transaction_date
            .unwrap_or_else(|| Local::now().date_naive()),
        expiry_date: cli.expiry_date,
        periodic_price: cli.price,
        period: cli.period,
        currency: cli.currency.unwrap_or(reference_currency),
        reference_currency,
        exchange_rate: cli.rate.unwrap_or(Decimal::ONE),
        transaction_price: cli.transaction_price,
    })
}

/// Rates against `reference`: live when an API key is configured, falling
/// back to the configured static rates.
///
/// Live rates are kept in the rate store and reused until they are older
/// than the cache TTL.
fn resolve_rates(config: &AppConfig, reference: Currency) -> AppResult<RateBook> {
    let exchange = &config.exchange;
    let static_rates = exchange.static_rates()?;

    let api_key = exchange.api_key.as_deref().filter(|_| exchange.has_api_key());
    let Some(api_key) = api_key else {
        let provider = StaticRateProvider::new(reference, static_rates);
        return provider
            .fetch(reference)
            .map_err(|e| AppError::ExternalService(e.to_string()));
    };

    let ttl = Duration::from_secs(exchange.cache_ttl_secs);
    let store = RateStore::new(&exchange.cache_path);
    let stored = store.load(reference);
    if let Some(book) = stored.as_ref().filter(|b| is_fresh(b, ttl, Utc::now())) {
        info!(%reference, fetched_at = %book.fetched_at, "Using stored exchange rates");
        return Ok(book.clone());
    }

    let provider = HttpRateProvider::new(exchange, api_key)
        .map_err(|e| AppError::ExternalService(e.to_string()))?;
    let cache = RateCache::with_ttl(Arc::new(provider), ttl);
    cache.remember(stored.unwrap_or_else(|| RateBook::new(reference, static_rates)));

    let lookup = cache.rates(reference);
    info!(%reference, origin = ?lookup.origin, "Exchange rates resolved");
    if lookup.origin == RateOrigin::Fetched
        && let Err(err) = store.save(&lookup.book)
    {
        warn!(path = %store.path().display(), error = %err, "Exchange rates not stored");
    }
    Ok(Arc::unwrap_or_clone(lookup.book))
}

fn render(valuation: &Valuation, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(valuation)),
        OutputFormat::Markdown => Ok(render_markdown(valuation)),
        OutputFormat::Json => serde_json::to_string_pretty(valuation)
            .map(|json| json + "\n")
            .map_err(|e| AppError::Internal(e.to_string())),
    }
}
