//! Phone geolocation subsystem.
//!
//! Provides area code extraction, the built-in area code table, remote
//! validation providers, and the resolver that chains them.

pub mod area_codes;
pub mod phone;
pub mod providers;
pub mod resolver;
pub mod types;

pub use area_codes::{AreaCodeEntry, AreaCodeKind, AreaCodeTable};
pub use phone::{
    extract_area_code, extract_area_code_with, AreaCode, CallDirection, ExtraDigits, ParserOptions,
    PhoneCall,
};
pub use providers::{AbstractApiProvider, NumVerifyProvider, PhoneProvider};
pub use resolver::PhoneResolver;
pub use types::{LocationError, LocationSource, PhoneLocation, UNKNOWN_LOCATION};
