//! Stations API client and the station directory.
//!
//! The directory is the full set of known bookable stations, fetched from
//! the stations API at startup (or the disk cache) and refreshed daily.

mod cache;
mod client;
mod directory;
mod error;

pub use cache::{StationCache, StationCacheConfig};
pub use client::{StationClient, StationClientConfig, StationDto};
pub use directory::StationDirectory;
pub use error::StationError;
