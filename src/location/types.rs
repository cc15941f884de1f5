//! Core types for the phone geolocation subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Region label used whenever an area code cannot be mapped to a place.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Country reported by the local area code fallback.
pub const FALLBACK_COUNTRY: &str = "United States";

/// Country or carrier reported when nothing better is known.
pub const UNKNOWN: &str = "Unknown";

/// Line type assumed by the local fallback. Not a measurement.
pub const ASSUMED_LINE_TYPE: &str = "mobile";

/// Which step of the fallback chain produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    NumVerify,
    AbstractApi,
    AreaCodeTable,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumVerify => write!(f, "NumVerify"),
            Self::AbstractApi => write!(f, "Abstract API"),
            Self::AreaCodeTable => write!(f, "Area code table"),
        }
    }
}

/// Best-effort geolocation of a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneLocation {
    pub country: String,
    /// "City, ST" for table lookups, provider-defined otherwise.
    pub region: String,
    pub carrier: String,
    pub line_type: String,
    /// International format from a provider, or the raw input for the fallback.
    pub formatted: String,
    pub source: LocationSource,
}

impl PhoneLocation {
    /// Build a result from a provider reply, filling blank or missing
    /// descriptive fields with the same placeholders the fallback uses.
    pub fn from_provider(
        source: LocationSource,
        raw: &str,
        country: Option<String>,
        region: Option<String>,
        carrier: Option<String>,
        line_type: Option<String>,
        formatted: Option<String>,
    ) -> Self {
        Self {
            country: non_blank(country).unwrap_or_else(|| UNKNOWN.to_string()),
            region: non_blank(region).unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            carrier: non_blank(carrier).unwrap_or_else(|| UNKNOWN.to_string()),
            line_type: non_blank(line_type).unwrap_or_else(|| "unknown".to_string()),
            formatted: non_blank(formatted).unwrap_or_else(|| raw.to_string()),
            source,
        }
    }

    /// One-line summary, e.g. "New York City, NY, United States (mobile, Unknown) [Area code table]".
    pub fn display_line(&self) -> String {
        format!(
            "{}, {} ({}, {}) [{}]",
            self.region, self.country, self.line_type, self.carrier, self.source
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Errors raised inside the subsystem. None of these escape
/// [`PhoneResolver::resolve`](super::PhoneResolver::resolve).
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("phone number has {digits} digits, at least 10 are required")]
    TooShort { digits: usize },

    #[error("phone number has {digits} digits and is not a NANP number")]
    NotNanp { digits: usize },

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("invalid area code table: {0}")]
    InvalidTable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LocationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_provider_fills_blanks() {
        let loc = PhoneLocation::from_provider(
            LocationSource::NumVerify,
            "+1 212 555 0100",
            Some("United States of America".into()),
            Some("".into()),
            None,
            Some("landline".into()),
            None,
        );
        assert_eq!(loc.country, "United States of America");
        assert_eq!(loc.region, UNKNOWN_LOCATION);
        assert_eq!(loc.carrier, UNKNOWN);
        assert_eq!(loc.line_type, "landline");
        assert_eq!(loc.formatted, "+1 212 555 0100");
    }

    #[test]
    fn test_source_serializes_by_name() {
        let json = serde_json::to_string(&LocationSource::AreaCodeTable).unwrap();
        assert_eq!(json, "\"AreaCodeTable\"");
        assert_eq!(LocationSource::AbstractApi.to_string(), "Abstract API");
    }

    #[test]
    fn test_error_messages() {
        let err = LocationError::TooShort { digits: 7 };
        assert_eq!(err.to_string(), "phone number has 7 digits, at least 10 are required");
        assert_eq!(LocationError::Status(503).to_string(), "provider returned HTTP 503");
    }
}
