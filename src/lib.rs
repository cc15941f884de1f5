//! US area code lookup with a remote phone-validation fallback chain.

pub mod config;
pub mod location;
pub mod logging;

pub use config::ResolverConfig;
pub use location::{AreaCodeTable, LocationError, PhoneLocation, PhoneResolver};
