//! The station directory.

use std::sync::Arc;
use tokio::sync::RwLock;

use tracing::debug;

use crate::domain::{Crs, Station};

use super::client::{StationClient, StationDto};
use super::error::StationError;

/// Thread-safe, ordered directory of bookable stations.
///
/// The order is the stations API's enumeration order (not alphabetical);
/// the typeahead filter preserves it. The directory is populated once at
/// startup and can be refreshed in the background; readers always see a
/// complete snapshot, never a partial update.
#[derive(Clone)]
pub struct StationDirectory {
    inner: Arc<RwLock<Vec<Station>>>,
    client: StationClient,
}

impl StationDirectory {
    /// Create a directory by fetching from the API.
    ///
    /// Fails if the API is unreachable.
    pub async fn fetch(client: StationClient) -> Result<Self, StationError> {
        let stations = client.fetch_all().await?;
        let list = build_list(stations);

        Ok(Self {
            inner: Arc::new(RwLock::new(list)),
            client,
        })
    }

    /// Create a directory from already-loaded station data (e.g. the
    /// disk cache), keeping the client for later refreshes.
    pub fn from_cached(client: StationClient, stations: Vec<StationDto>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(build_list(stations))),
            client,
        }
    }

    /// An owned, ordered snapshot of the directory.
    pub async fn snapshot(&self) -> Vec<Station> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Number of stations in the directory.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Check if the directory is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Refresh the directory from the API.
    ///
    /// On success, replaces the list wholesale. On failure, the existing
    /// list is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, StationError> {
        let stations = self.client.fetch_all().await?;
        let list = build_list(stations);
        let count = list.len();

        let mut guard = self.inner.write().await;
        *guard = list;

        Ok(count)
    }
}

/// Build the ordered station list from DTOs.
///
/// Stations without a parseable CRS are dropped: they cannot be searched
/// for fares, and dropping them here is what lets the controller treat a
/// selected station without a CRS as a programming error. The API serves
/// codes in lowercase; `Crs::parse` normalises.
fn build_list(stations: Vec<StationDto>) -> Vec<Station> {
    let total = stations.len();
    let list: Vec<Station> = stations
        .into_iter()
        .filter_map(|dto| {
            let crs = Crs::parse(dto.crs.as_deref()?).ok()?;
            Some(Station::new(dto.id, dto.name, crs))
        })
        .collect();

    debug!(
        bookable = list.len(),
        dropped = total - list.len(),
        "built station directory"
    );
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: u32, name: &str, crs: Option<&str>) -> StationDto {
        StationDto {
            id,
            name: name.to_string(),
            crs: crs.map(str::to_string),
        }
    }

    #[test]
    fn build_list_preserves_api_order() {
        let list = build_list(vec![
            dto(10, "York", Some("YRK")),
            dto(2, "Edinburgh", Some("EDB")),
            dto(5, "London Kings Cross", Some("KGX")),
        ]);

        let names: Vec<&str> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["York", "Edinburgh", "London Kings Cross"]);
    }

    #[test]
    fn build_list_drops_unbookable_stations() {
        let list = build_list(vec![
            dto(1, "London Kings Cross", Some("KGX")),
            dto(2, "Mystery Halt", None),
            dto(3, "Bad Code", Some("not-a-crs")),
            dto(4, "Edinburgh", Some("EDB")),
        ]);

        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|s| s.is_bookable()));
    }

    #[test]
    fn build_list_normalises_lowercase_crs() {
        let list = build_list(vec![dto(1, "London Kings Cross", Some("kgx"))]);
        assert_eq!(list[0].crs, Some(Crs::parse("KGX").unwrap()));
    }

    #[tokio::test]
    async fn failed_refresh_preserves_existing_list() {
        use super::super::client::StationClientConfig;

        // Nothing listens on this port; the fetch fails fast.
        let config = StationClientConfig::new("test-key").with_base_url("http://127.0.0.1:1");
        let client = StationClient::new(config).unwrap();

        let directory = StationDirectory::from_cached(
            client,
            vec![
                dto(1, "London Kings Cross", Some("KGX")),
                dto(2, "Edinburgh", Some("EDB")),
            ],
        );
        assert_eq!(directory.len().await, 2);

        assert!(directory.refresh().await.is_err());

        let snapshot = directory.snapshot().await;
        let names: Vec<&str> = snapshot.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["London Kings Cross", "Edinburgh"]);
    }
}
