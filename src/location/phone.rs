//! Phone number normalization and area code extraction.
//!
//! Area code flow:  strip non-digits → length check → drop leading `1` on
//! 11-digit numbers → first three digits.

use super::types::{LocationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum digits in a US subscriber number including the area code.
pub const MIN_DIGITS: usize = 10;

/// A three-digit area code. Not necessarily present in the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AreaCode(String);

impl AreaCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to do with digit strings that are neither 10 digits nor `1` + 10 digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtraDigits {
    /// Take the first three digits anyway. Wrong for most non-NANP numbers,
    /// kept as the default for compatibility with existing callers.
    #[default]
    LeadingDigits,
    /// Refuse with [`LocationError::NotNanp`].
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    pub extra_digits: ExtraDigits,
}

impl ParserOptions {
    pub fn strict() -> Self {
        Self { extra_digits: ExtraDigits::Reject }
    }
}

/// Keep only ASCII digits.
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Extract the area code with default options.
pub fn extract_area_code(raw: &str) -> Result<AreaCode> {
    extract_area_code_with(raw, ParserOptions::default())
}

pub fn extract_area_code_with(raw: &str, opts: ParserOptions) -> Result<AreaCode> {
    let digits = normalize_digits(raw);
    let len = digits.len();

    if len < MIN_DIGITS {
        return Err(LocationError::TooShort { digits: len });
    }

    let national = if len == 11 && digits.starts_with('1') {
        &digits[1..]
    } else if len == MIN_DIGITS {
        digits.as_str()
    } else {
        match opts.extra_digits {
            ExtraDigits::LeadingDigits => digits.as_str(),
            ExtraDigits::Reject => return Err(LocationError::NotNanp { digits: len }),
        }
    };

    Ok(AreaCode(national[..3].to_string()))
}

/// Format for display: `+1XXXXXXXXXX` for US numbers, "N/A" for empty input.
pub fn format_for_display(raw: &str) -> String {
    if raw.is_empty() {
        return "N/A".to_string();
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if cleaned.starts_with('+') {
        return cleaned;
    }
    match cleaned.len() {
        10 => format!("+1{}", cleaned),
        11 if cleaned.starts_with('1') => format!("+{}", cleaned),
        _ => cleaned,
    }
}

/// Cheap plausibility check: at least 10 digits, and `+` numbers carry a
/// country code on top.
pub fn is_plausible(raw: &str) -> bool {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let digits = cleaned.chars().filter(|c| c.is_ascii_digit()).count();

    if digits < MIN_DIGITS {
        return false;
    }
    if cleaned.starts_with('+') {
        cleaned.len() >= 11
    } else {
        true
    }
}

// ─── Call records ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CallDirection {
    Inbound,
    Outbound,
    #[default]
    Unknown,
}

impl From<String> for CallDirection {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl CallDirection {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "inbound" => Self::Inbound,
            "outbound" => Self::Outbound,
            _ => Self::Unknown,
        }
    }
}

/// The phone side of a call record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneCall {
    #[serde(default)]
    pub direction: CallDirection,
    #[serde(default)]
    pub agent_number: Option<String>,
    #[serde(default)]
    pub external_number: Option<String>,
}

impl PhoneCall {
    /// The number worth locating: the caller on inbound calls, the agent
    /// line on outbound calls, whichever is present otherwise.
    pub fn primary_number(&self) -> Option<&str> {
        let external = self.external_number.as_deref().filter(|s| !s.is_empty());
        let agent = self.agent_number.as_deref().filter(|s| !s.is_empty());
        match self.direction {
            CallDirection::Inbound => external,
            CallDirection::Outbound => agent,
            CallDirection::Unknown => external.or(agent),
        }
    }

    pub fn summary(&self) -> String {
        let agent = format_for_display(self.agent_number.as_deref().unwrap_or(""));
        let external = format_for_display(self.external_number.as_deref().unwrap_or(""));
        match self.direction {
            CallDirection::Inbound => format!("Inbound call from {} to {}", external, agent),
            CallDirection::Outbound => format!("Outbound call from {} to {}", agent, external),
            CallDirection::Unknown => format!("Call between {} and {}", agent, external),
        }
    }
}
