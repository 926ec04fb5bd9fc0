//! Devradar library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod directory;
pub mod location;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which geolocation capability backs the bootstrap position read.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum LocationKind {
    #[default]
    Fixed,
    GeoIp,
}

impl LocationKind {
    /// Config-file spelling of the provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Fixed => "fixed",
            LocationKind::GeoIp => "geoip",
        }
    }
}
