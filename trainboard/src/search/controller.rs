//! Journey search controller.
//!
//! Gates the asynchronous fare lookup behind validation of the two
//! station selections and tracks the search lifecycle as a single
//! [`SearchState`], published through a watch channel so a rendering
//! layer can observe "current value + changes".

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::domain::{Crs, FareSearchResult, Journey, Station};
use crate::fares::{FareError, FareSource};

use super::dropdown::StationDropdown;
use super::notify::Notify;
use super::state::SearchState;

/// Validation failure shown when no origin is selected.
pub const MSG_NO_ORIGIN: &str = "Origin station not selected or invalid.";
/// Validation failure shown when no destination is selected.
pub const MSG_NO_DESTINATION: &str = "Destination station not selected or invalid.";
/// Validation failure shown when both ends are the same station.
pub const MSG_SAME_STATIONS: &str = "Origin and destination stations cannot be the same.";
/// Generic user-facing message for transport failures. The underlying
/// error goes to the log, not the screen.
pub const MSG_SEARCH_FAILED: &str = "An error occurred while searching for journeys.";

/// Which station picker an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Origin,
    Destination,
}

/// The controller's observable result state.
pub type JourneyState = SearchState<Vec<Journey>, String>;

/// State shared with in-flight fare lookups.
struct SearchInner {
    fares: Arc<dyn FareSource>,
    notifier: Arc<dyn Notify>,
    /// Generation of the most recently accepted search. Guards both the
    /// counter bump and the state publish, so a stale completion can
    /// never overwrite a newer request's state.
    generation: Mutex<u64>,
    state: watch::Sender<JourneyState>,
}

impl SearchInner {
    /// Apply a completed lookup, unless a newer search has started since.
    fn complete(&self, generation: u64, outcome: Result<FareSearchResult, FareError>) {
        let current = self.generation.lock().expect("generation lock poisoned");
        if *current != generation {
            trace!(
                generation,
                current = *current,
                "dropping stale fare search result"
            );
            return;
        }

        match outcome {
            Ok(result) => {
                debug!(
                    generation,
                    journeys = result.outbound_journeys.len(),
                    "fare search succeeded"
                );
                self.state
                    .send_replace(SearchState::Success(result.outbound_journeys));
            }
            Err(error) => {
                warn!(generation, %error, "fare search failed");
                self.state
                    .send_replace(SearchState::Error(MSG_SEARCH_FAILED.to_string()));
            }
        }
    }
}

/// Coordinates origin/destination selection and the fare lookup.
///
/// All mutation happens on the caller's (logical UI) task; the only
/// asynchronous operation is the fare lookup itself, which is spawned in
/// the background and rejoins by publishing into the watch channel.
pub struct JourneySearchController {
    origin: StationDropdown,
    destination: StationDropdown,
    inner: Arc<SearchInner>,
}

impl JourneySearchController {
    pub fn new(fares: Arc<dyn FareSource>, notifier: Arc<dyn Notify>) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            origin: StationDropdown::new(),
            destination: StationDropdown::new(),
            inner: Arc::new(SearchInner {
                fares,
                notifier,
                generation: Mutex::new(0),
                state,
            }),
        }
    }

    /// The current result state.
    pub fn current(&self) -> JourneyState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to result-state changes.
    pub fn subscribe(&self) -> watch::Receiver<JourneyState> {
        self.inner.state.subscribe()
    }

    /// Read access to one picker's state.
    pub fn slot(&self, slot: Slot) -> &StationDropdown {
        match slot {
            Slot::Origin => &self.origin,
            Slot::Destination => &self.destination,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut StationDropdown {
        match slot {
            Slot::Origin => &mut self.origin,
            Slot::Destination => &mut self.destination,
        }
    }

    /// The user edited a picker's query text.
    pub fn on_query_changed(&mut self, slot: Slot, text: impl Into<String>) {
        self.slot_mut(slot).set_query(text);
    }

    /// The user picked a station from a candidate list.
    pub fn on_station_picked(&mut self, slot: Slot, station: Station) {
        self.slot_mut(slot).pick(station);
    }

    /// A picker lost input focus; try exact-match resolution.
    pub fn on_focus_lost(&mut self, slot: Slot, directory: &[Station]) {
        self.slot_mut(slot).blur(directory);
    }

    /// Request a search for the currently selected pair.
    pub fn request_search_selected(&self) {
        // Clone out so the immutable borrow of the slots ends before the
        // request mutates shared state.
        let origin = self.origin.selection().cloned();
        let destination = self.destination.selection().cloned();
        self.request_search(origin.as_ref(), destination.as_ref());
    }

    /// Request a search for an explicit pair of selections.
    ///
    /// Validation failures leave the result state untouched and emit one
    /// notification. On success the state moves to `Loading` before this
    /// method returns, and later to `Success` or `Error` when the lookup
    /// resolves - unless a newer search has been requested in the
    /// meantime, in which case the older result is discarded (last
    /// request wins).
    ///
    /// # Panics
    ///
    /// Panics if a selected station has no CRS code. The directory drops
    /// non-bookable stations, so this indicates a bug in whatever
    /// produced the selection, not a user error.
    pub fn request_search(&self, origin: Option<&Station>, destination: Option<&Station>) {
        let (origin_crs, destination_crs) = match validate(origin, destination) {
            Ok(pair) => pair,
            Err(message) => {
                debug!(message, "search request rejected");
                self.inner.notifier.notify(message);
                return;
            }
        };

        // Bump the generation and publish Loading under the same lock so
        // no completion can interleave between the two.
        let generation = {
            let mut current = self.inner.generation.lock().expect("generation lock poisoned");
            *current += 1;
            self.inner.state.send_replace(SearchState::Loading);
            *current
        };

        debug!(%origin_crs, %destination_crs, generation, "journey search started");

        let lookup = self
            .inner
            .fares
            .search(origin_crs, destination_crs, Utc::now());

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = lookup.await;
            inner.complete(generation, outcome);
        });
    }
}

/// Check a selection pair, returning the CRS codes to search with.
fn validate(
    origin: Option<&Station>,
    destination: Option<&Station>,
) -> Result<(Crs, Crs), &'static str> {
    let origin = origin.ok_or(MSG_NO_ORIGIN)?;
    let destination = destination.ok_or(MSG_NO_DESTINATION)?;

    // A missing CRS here is a directory-invariant violation, not a user
    // error: the directory only ever hands out bookable stations.
    let Some(origin_crs) = origin.crs else {
        panic!("selected origin {:?} has no CRS code", origin.name);
    };
    let Some(destination_crs) = destination.crs else {
        panic!("selected destination {:?} has no CRS code", destination.name);
    };

    if origin == destination {
        return Err(MSG_SAME_STATIONS);
    }

    Ok((origin_crs, destination_crs))
}
