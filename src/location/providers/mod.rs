pub mod fixed;
pub mod geoip;

pub use fixed::FixedLocationProvider;
pub use geoip::GeoIpLocationProvider;
