//! Fares API client and the fare-search seam.
//!
//! The `/fares` endpoint answers "how do I get from A to B, departing
//! now, and what does it cost?" with a list of outbound journey options.
//! Everything downstream of the HTTP call is synchronous conversion into
//! the domain types in [`crate::domain`].

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{FareClient, FareClientConfig};
pub use convert::ConversionError;
pub use error::FareError;
pub use mock::MockFareSource;
pub use source::FareSource;
