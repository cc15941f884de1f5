//! Remote phone validation providers: NumVerify and Abstract API.
//!
//! Each provider is one blocking GET with the API key and the number in the
//! query string. Any transport failure, timeout, non-2xx status, or
//! unparseable body comes back as an `Err` so the resolver can move on.

use super::types::{LocationError, LocationSource, PhoneLocation, Result};
use crate::config::ResolverConfig;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("areacode-locator/", env!("CARGO_PKG_VERSION"));

/// A remote source of phone number metadata.
pub trait PhoneProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// `Ok(Some(_))` when the provider vouches for the number,
    /// `Ok(None)` when it answers that the number is invalid,
    /// `Err(_)` when the provider could not be used.
    fn try_validate(&self, phone: &str) -> Result<Option<PhoneLocation>>;
}

fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

fn fetch_json<T: serde::de::DeserializeOwned>(request: ureq::Request) -> Result<T> {
    let response = request.call().map_err(|e| match e {
        ureq::Error::Status(code, _) => LocationError::Status(code),
        other => LocationError::Network(other.to_string()),
    })?;

    response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))
}

// ─── NumVerify ──────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct NumVerifyReply {
    #[serde(default)]
    valid: bool,
    country_name: Option<String>,
    location: Option<String>,
    carrier: Option<String>,
    line_type: Option<String>,
    international_format: Option<String>,
}

pub struct NumVerifyProvider {
    agent: ureq::Agent,
    url: String,
    api_key: String,
}

impl NumVerifyProvider {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

impl PhoneProvider for NumVerifyProvider {
    fn name(&self) -> &'static str {
        "numverify"
    }

    fn try_validate(&self, phone: &str) -> Result<Option<PhoneLocation>> {
        let request = self
            .agent
            .get(&self.url)
            .query("access_key", &self.api_key)
            .query("number", phone)
            .query("format", "1");
        let reply: NumVerifyReply = fetch_json(request)?;

        if !reply.valid {
            debug!(provider = self.name(), "number reported invalid");
            return Ok(None);
        }

        Ok(Some(PhoneLocation::from_provider(
            LocationSource::NumVerify,
            phone,
            reply.country_name,
            reply.location,
            reply.carrier,
            reply.line_type,
            reply.international_format,
        )))
    }
}

// ─── Abstract API ───────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct Named {
    name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct AbstractFormat {
    international: Option<String>,
}

#[derive(Deserialize, Debug)]
struct AbstractReply {
    #[serde(default)]
    valid: bool,
    country: Option<Named>,
    region: Option<Named>,
    carrier: Option<String>,
    #[serde(rename = "type")]
    line_type: Option<String>,
    format: Option<AbstractFormat>,
}

pub struct AbstractApiProvider {
    agent: ureq::Agent,
    url: String,
    api_key: String,
}

impl AbstractApiProvider {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

impl PhoneProvider for AbstractApiProvider {
    fn name(&self) -> &'static str {
        "abstractapi"
    }

    fn try_validate(&self, phone: &str) -> Result<Option<PhoneLocation>> {
        let request = self
            .agent
            .get(&self.url)
            .query("api_key", &self.api_key)
            .query("phone", phone);
        let reply: AbstractReply = fetch_json(request)?;

        if !reply.valid {
            debug!(provider = self.name(), "number reported invalid");
            return Ok(None);
        }

        Ok(Some(PhoneLocation::from_provider(
            LocationSource::AbstractApi,
            phone,
            reply.country.and_then(|c| c.name),
            reply.region.and_then(|r| r.name),
            reply.carrier,
            reply.line_type,
            reply.format.and_then(|f| f.international),
        )))
    }
}

/// Providers in fallback order, skipping any without an API key.
pub fn providers_from_config(config: &ResolverConfig) -> Vec<Box<dyn PhoneProvider>> {
    let mut providers: Vec<Box<dyn PhoneProvider>> = Vec::new();

    if let Some(key) = config.numverify_api_key.as_deref() {
        providers.push(Box::new(NumVerifyProvider::new(&config.numverify_url, key, config.timeout)));
    }
    if let Some(key) = config.abstract_api_key.as_deref() {
        providers.push(Box::new(AbstractApiProvider::new(&config.abstract_url, key, config.timeout)));
    }

    providers
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[test]
    fn test_numverify_valid() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/validate")
                .query_param("access_key", "nv-key")
                .query_param("number", "+12125550100")
                .query_param("format", "1");
            then.status(200).json_body(json!({
                "valid": true,
                "number": "12125550100",
                "international_format": "+12125550100",
                "country_name": "United States of America",
                "location": "New York",
                "carrier": "Verizon",
                "line_type": "landline"
            }));
        });

        let provider = NumVerifyProvider::new(server.url("/api/validate"), "nv-key", TIMEOUT);
        let loc = provider.try_validate("+12125550100").unwrap().unwrap();

        mock.assert();
        assert_eq!(loc.source, LocationSource::NumVerify);
        assert_eq!(loc.country, "United States of America");
        assert_eq!(loc.region, "New York");
        assert_eq!(loc.carrier, "Verizon");
        assert_eq!(loc.line_type, "landline");
        assert_eq!(loc.formatted, "+12125550100");
    }

    #[test]
    fn test_numverify_invalid_number() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/validate");
            then.status(200).json_body(json!({ "valid": false }));
        });

        let provider = NumVerifyProvider::new(server.url("/api/validate"), "nv-key", TIMEOUT);
        assert!(provider.try_validate("12345").unwrap().is_none());
    }

    #[test]
    fn test_numverify_error_body_is_not_valid() {
        // apilayer reports bad keys with 200 and an error object
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/validate");
            then.status(200).json_body(json!({
                "success": false,
                "error": { "code": 101, "type": "invalid_access_key" }
            }));
        });

        let provider = NumVerifyProvider::new(server.url("/api/validate"), "bad", TIMEOUT);
        assert!(provider.try_validate("+12125550100").unwrap().is_none());
    }

    #[test]
    fn test_abstract_valid() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/")
                .query_param("api_key", "ab-key")
                .query_param("phone", "4155550123");
            then.status(200).json_body(json!({
                "phone": "14155550123",
                "valid": true,
                "format": { "international": "+14155550123", "local": "(415) 555-0123" },
                "country": { "code": "US", "name": "United States", "prefix": "+1" },
                "region": { "name": "California" },
                "type": "mobile",
                "carrier": "T-Mobile USA, Inc."
            }));
        });

        let provider = AbstractApiProvider::new(server.url("/v1/"), "ab-key", TIMEOUT);
        let loc = provider.try_validate("4155550123").unwrap().unwrap();

        mock.assert();
        assert_eq!(loc.source, LocationSource::AbstractApi);
        assert_eq!(loc.country, "United States");
        assert_eq!(loc.region, "California");
        assert_eq!(loc.carrier, "T-Mobile USA, Inc.");
        assert_eq!(loc.line_type, "mobile");
        assert_eq!(loc.formatted, "+14155550123");
    }

    #[test]
    fn test_abstract_missing_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/");
            then.status(200).json_body(json!({ "valid": true }));
        });

        let provider = AbstractApiProvider::new(server.url("/v1/"), "ab-key", TIMEOUT);
        let loc = provider.try_validate("4155550123").unwrap().unwrap();
        assert_eq!(loc.region, "Unknown Location");
        assert_eq!(loc.formatted, "4155550123");
    }

    #[test]
    fn test_http_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/");
            then.status(429).body("rate limited");
        });

        let provider = AbstractApiProvider::new(server.url("/v1/"), "ab-key", TIMEOUT);
        let err = provider.try_validate("4155550123").unwrap_err();
        assert!(matches!(err, LocationError::Status(429)));
    }

    #[test]
    fn test_malformed_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/validate");
            then.status(200).body("<html>maintenance</html>");
        });

        let provider = NumVerifyProvider::new(server.url("/api/validate"), "nv-key", TIMEOUT);
        let err = provider.try_validate("+12125550100").unwrap_err();
        assert!(matches!(err, LocationError::InvalidResponse(_)));
    }

    #[test]
    fn test_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/validate");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(json!({ "valid": true }));
        });

        let provider = NumVerifyProvider::new(
            server.url("/api/validate"),
            "nv-key",
            Duration::from_millis(100),
        );
        let err = provider.try_validate("+12125550100").unwrap_err();
        assert!(matches!(err, LocationError::Network(_)));
    }

    #[test]
    fn test_unreachable_host() {
        let provider = NumVerifyProvider::new("http://127.0.0.1:1/api/validate", "nv-key", TIMEOUT);
        let err = provider.try_validate("+12125550100").unwrap_err();
        assert!(matches!(err, LocationError::Network(_)));
    }

    #[test]
    fn test_providers_from_config() {
        let none = ResolverConfig::default();
        assert!(providers_from_config(&none).is_empty());

        let both = ResolverConfig {
            numverify_api_key: Some("a".into()),
            abstract_api_key: Some("b".into()),
            ..ResolverConfig::default()
        };
        let names: Vec<&str> = providers_from_config(&both).iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["numverify", "abstractapi"]);

        let abstract_only = ResolverConfig {
            abstract_api_key: Some("b".into()),
            ..ResolverConfig::default()
        };
        let names: Vec<&str> = providers_from_config(&abstract_only).iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["abstractapi"]);
    }
}
