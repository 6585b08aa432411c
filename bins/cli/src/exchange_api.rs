//! HTTP rate provider for the exchangerate-api v6 endpoint.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use vpsval_core::currency::{RateBook, RateError, RateProvider};
use vpsval_shared::Currency;
use vpsval_shared::config::ExchangeConfig;

/// Response body of `GET {base_url}/{key}/latest/{BASE}`.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    conversion_rates: HashMap<String, serde_json::Number>,
    #[serde(rename = "error-type", default)]
    error_type: Option<String>,
}

/// Rate provider backed by a blocking HTTP client.
pub struct HttpRateProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl HttpRateProvider {
    /// Creates a provider from the exchange configuration.
    ///
    /// # Errors
    ///
    /// Returns `RateError::Request` if the HTTP client cannot be built.
    pub fn new(config: &ExchangeConfig, api_key: impl Into<String>) -> Result<Self, RateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RateError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn url(&self, base: Currency) -> String {
        format!("{}/{}/latest/{}", self.base_url, self.api_key, base.code())
    }
}

impl RateProvider for HttpRateProvider {
    fn fetch(&self, base: Currency) -> Result<RateBook, RateError> {
        let response = self
            .client
            .get(self.url(base))
            .send()
            .map_err(|e| RateError::Request(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| RateError::Request(e.without_url().to_string()))?;

        // The provider reports key and quota failures as JSON with a 4xx status.
        match parse_response(base, &body) {
            Err(RateError::Decode(_)) if !status.is_success() => {
                Err(RateError::Request(format!("HTTP {status}")))
            }
            other => other,
        }
    }
}

/// Parses a `latest` response into a rate book quoted against `base`.
///
/// Quotes for currencies outside the supported set are dropped.
///
/// # Errors
///
/// Returns `RateError::Api` when the provider reports a failure and
/// `RateError::Decode` when the body is malformed or quotes another base.
pub fn parse_response(base: Currency, body: &str) -> Result<RateBook, RateError> {
    let response: LatestResponse =
        serde_json::from_str(body).map_err(|e| RateError::Decode(e.to_string()))?;

    if response.result != "success" {
        return Err(RateError::Api(
            response.error_type.unwrap_or(response.result),
        ));
    }

    if let Some(code) = response.base_code.as_deref()
        && !code.eq_ignore_ascii_case(base.code())
    {
        return Err(RateError::Decode(format!(
            "expected rates against {base}, got {code}"
        )));
    }

    let quotes = response
        .conversion_rates
        .iter()
        .filter(|(code, _)| code.parse::<Currency>().is_ok())
        .map(|(code, number)| Ok((code.as_str(), parse_number(code, number)?)))
        .collect::<Result<Vec<_>, RateError>>()?;

    Ok(RateBook::from_quotes(base, quotes))
}

fn parse_number(code: &str, number: &serde_json::Number) -> Result<Decimal, RateError> {
    let text = number.to_string();
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| RateError::Decode(format!("rate for {code}: {e}")))
}
