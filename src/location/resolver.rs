//! Phone resolver — orchestrates the fallback chain.
//!
//! Flow:  provider 1 → provider 2 → … → local area code table
//!
//! Every step that cannot answer is skipped; the table always answers.

use super::area_codes::AreaCodeTable;
use super::phone::{self, ParserOptions, PhoneCall};
use super::providers::{self, PhoneProvider};
use super::types::{
    LocationSource, PhoneLocation, ASSUMED_LINE_TYPE, FALLBACK_COUNTRY, UNKNOWN, UNKNOWN_LOCATION,
};
use crate::config::ResolverConfig;
use std::sync::Arc;
use tracing::{debug, warn};

/// The phone resolver with its fallback pipeline.
pub struct PhoneResolver {
    table: Arc<AreaCodeTable>,
    providers: Vec<Box<dyn PhoneProvider>>,
    parser: ParserOptions,
    offline: bool,
}

impl PhoneResolver {
    /// Resolver over an explicit provider list, tried in order.
    pub fn new(table: Arc<AreaCodeTable>, providers: Vec<Box<dyn PhoneProvider>>) -> Self {
        Self {
            table,
            providers,
            parser: ParserOptions::default(),
            offline: false,
        }
    }

    /// Resolver with the providers that have keys in `config`.
    pub fn from_config(config: &ResolverConfig, table: Arc<AreaCodeTable>) -> Self {
        if !config.has_providers() {
            debug!("no provider keys configured, resolving from the area code table only");
        }
        Self::new(table, providers::providers_from_config(config)).with_parser(config.parser)
    }

    /// Resolver that only consults the table.
    pub fn local(table: Arc<AreaCodeTable>) -> Self {
        Self::new(table, Vec::new())
    }

    pub fn with_parser(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }

    /// Set offline mode — skip network calls.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn table(&self) -> &AreaCodeTable {
        &self.table
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Best-effort location for a raw phone string. Never fails.
    pub fn resolve(&self, raw: &str) -> PhoneLocation {
        if !self.offline {
            for provider in &self.providers {
                match provider.try_validate(raw) {
                    Ok(Some(loc)) => {
                        debug!(provider = provider.name(), region = %loc.region, "provider resolved number");
                        return loc;
                    }
                    Ok(None) => {
                        debug!(provider = provider.name(), "provider rejected number, trying next");
                    }
                    Err(e) => {
                        warn!(provider = provider.name(), error = %e, "provider unavailable, trying next");
                    }
                }
            }
        }

        self.fallback(raw)
    }

    /// Just the region label, for callers that embed it in a larger payload.
    pub fn resolve_region(&self, raw: &str) -> String {
        self.resolve(raw).region
    }

    /// Resolve the number that matters for a call, if it has one.
    pub fn resolve_call(&self, call: &PhoneCall) -> Option<PhoneLocation> {
        call.primary_number().map(|n| self.resolve(n))
    }

    /// Local table answer: fixed country, carrier and line type.
    pub fn fallback(&self, raw: &str) -> PhoneLocation {
        let region = match phone::extract_area_code_with(raw, self.parser) {
            Ok(code) => self.table.lookup(code.as_str()).to_string(),
            Err(e) => {
                debug!(error = %e, "no usable area code");
                UNKNOWN_LOCATION.to_string()
            }
        };

        PhoneLocation {
            country: FALLBACK_COUNTRY.to_string(),
            region,
            carrier: UNKNOWN.to_string(),
            line_type: ASSUMED_LINE_TYPE.to_string(),
            formatted: raw.to_string(),
            source: LocationSource::AreaCodeTable,
        }
    }
}
