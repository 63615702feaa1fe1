//! Train journey fare search.
//!
//! The core of a departure-board app: type to filter a station
//! directory, pick an origin and a destination, and search for journey
//! fares between them. The search lifecycle is a single
//! idle/loading/success/error state observable by a rendering layer.

pub mod cache;
pub mod domain;
pub mod fares;
pub mod search;
pub mod stations;
