//! The fare-search seam.

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;

use crate::domain::{Crs, FareSearchResult};

use super::error::FareError;

/// A single-shot asynchronous fare search.
///
/// The controller drives everything through this trait so the HTTP
/// client, the cached wrapper and the test mock are interchangeable.
/// Implementations must be cheap to call: all the work happens in the
/// returned future.
pub trait FareSource: Send + Sync + 'static {
    /// Search for fares between two stations departing at `outbound`.
    fn search(
        &self,
        origin: Crs,
        destination: Crs,
        outbound: DateTime<Utc>,
    ) -> BoxFuture<'static, Result<FareSearchResult, FareError>>;
}
