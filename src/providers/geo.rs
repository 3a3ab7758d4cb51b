//! IP geolocation service using ip2location.io.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::extract::extract;

/// Geolocation data returned by ip2location.io.
///
/// The service answers with a flat JSON object (`ip`, `country_name`,
/// `region_name`, `city_name`, `latitude`, `longitude`, `isp`, `time_zone`,
/// `is_proxy`, ...). Every field is optional; read them through
/// [`Record::field`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
  /// Display string for `key`, `"N/A"` when absent.
  #[must_use]
  pub fn field(&self, key: &str) -> String {
    extract(&self.0, key)
  }

  /// Whether the service flagged the address as a proxy or VPN.
  ///
  /// Only the number 1, boolean `true` or the text `"1"` count.
  #[must_use]
  pub fn is_proxy(&self) -> bool {
    match self.0.get("is_proxy") {
      Some(Value::Bool(flag)) => *flag,
      Some(Value::Number(n)) => n
        .as_f64()
        .is_some_and(|v| (v - 1.0).abs() < f64::EPSILON),
      Some(Value::String(s)) => s == "1",
      _ => false,
    }
  }

  /// The service signals failures with a non-null `error` member.
  fn api_error(&self) -> Option<String> {
    match self.0.get("error") {
      None | Some(Value::Null) => None,
      Some(Value::Object(inner)) => Some(extract(inner, "error_message")),
      Some(_) => Some(self.field("error")),
    }
  }
}

/// Why a lookup did not produce a [`Record`].
#[derive(Debug, Error)]
pub enum LookupError {
  #[error("Network Error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("HTTP Request Failed: Status Code {0}")]
  Status(u16),

  #[error("JSON Parsing Error: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("API Error: {0}")]
  Api(String),
}

/// Thin client around the geolocation endpoint.
#[derive(Debug, Clone)]
pub struct GeoClient {
  http: Client,
  endpoint: String,
  api_key: Option<String>,
}

impl GeoClient {
  #[must_use]
  pub const fn new(
    http: Client,
    endpoint: String,
    api_key: Option<String>,
  ) -> Self {
    Self {
      http,
      endpoint,
      api_key,
    }
  }

  /// Builds a client for the configured endpoint and key.
  ///
  /// Idle connections are not pooled, so each lookup's connection is
  /// closed once the call completes.
  ///
  /// # Errors
  /// Returns an error if the underlying HTTP client cannot be built.
  pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
    let http = Client::builder()
      .user_agent(format!("ip-tracker/{}", env!("CARGO_PKG_VERSION")))
      .pool_max_idle_per_host(0)
      .build()?;
    Ok(Self::new(
      http,
      settings.endpoint.clone(),
      settings.api_key.clone(),
    ))
  }

  /// Fetches geolocation for an IP address or domain.
  ///
  /// One attempt is made per call. The target is passed to the service
  /// untouched; malformed identifiers come back as [`LookupError::Api`].
  ///
  /// # Errors
  /// - Failed HTTP request (DNS, connect, TLS, timeout); the request URL
  ///   carries the API key and is stripped from these errors
  /// - Status code other than 200
  /// - Body that is not a JSON object
  /// - Response carrying an `error` member
  ///
  /// # Example
  /// ```ignore
  /// use ip_tracker::providers::geo::GeoClient;
  /// let client = GeoClient::new(reqwest::Client::new(), url, None);
  /// let record = client.lookup("8.8.8.8").await?;
  /// ```
  pub async fn lookup(&self, target: &str) -> Result<Record, LookupError> {
    let mut query: Vec<(&str, &str)> = Vec::with_capacity(2);
    if let Some(key) = self.api_key.as_deref() {
      query.push(("key", key));
    }
    query.push(("ip", target));

    debug!(
      endpoint = %self.endpoint,
      ip = target,
      "sending geolocation request"
    );
    let response = self
      .http
      .get(&self.endpoint)
      .query(&query)
      .send()
      .await
      .map_err(reqwest::Error::without_url)
      .inspect_err(|e| warn!("geolocation request failed: {e}"))?;

    let status = response.status();
    if status != StatusCode::OK {
      warn!(status = status.as_u16(), "geolocation service refused request");
      return Err(LookupError::Status(status.as_u16()));
    }

    let body = response
      .text()
      .await
      .map_err(reqwest::Error::without_url)?;
    let record: Record = serde_json::from_str(&body)?;

    if let Some(message) = record.api_error() {
      warn!(ip = target, "geolocation service reported: {message}");
      return Err(LookupError::Api(message));
    }

    Ok(record)
  }
}
