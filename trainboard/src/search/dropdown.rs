//! Selection state for one station picker (origin or destination).

use crate::domain::Station;

use super::filter::{filter_stations, resolve_exact};

/// State of a single typeahead station picker.
///
/// Keeps the typed query and the confirmed selection consistent: a
/// selection only ever coexists with text that (case-insensitively)
/// equals the selected station's name. Editing the text away from that
/// name clears the selection immediately.
#[derive(Debug, Clone, Default)]
pub struct StationDropdown {
    query: String,
    selection: Option<Station>,
    open: bool,
}

impl StationDropdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The confirmed selection, if any.
    pub fn selection(&self) -> Option<&Station> {
        self.selection.as_ref()
    }

    /// Whether the candidate list is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The candidate list for the current query.
    pub fn candidates<'a>(&self, directory: &'a [Station]) -> Vec<&'a Station> {
        filter_stations(directory, &self.query)
    }

    /// Apply an edit to the query text.
    ///
    /// Opens the candidate list. If the new text no longer matches the
    /// selected station's name, the selection is cleared; selection and
    /// text never disagree.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.open = true;

        // Same case folding as filtering and blur resolution.
        if let Some(selected) = &self.selection
            && selected.name.to_lowercase() != self.query.to_lowercase()
        {
            self.selection = None;
        }
    }

    /// Confirm an explicit pick from the candidate list.
    ///
    /// Normalises the query text to the station's canonical name and
    /// closes the list.
    pub fn pick(&mut self, station: Station) {
        self.query = station.name.clone();
        self.selection = Some(station);
        self.open = false;
    }

    /// Handle loss of input focus.
    ///
    /// If the typed text is exactly some candidate's name
    /// (case-insensitively), that station becomes the selection, same as
    /// an explicit pick. Otherwise the raw text stays and the selection
    /// remains unresolved.
    pub fn blur(&mut self, directory: &[Station]) {
        let candidates = self.candidates(directory);
        if let Some(station) = resolve_exact(&candidates, &self.query) {
            self.pick(station.clone());
        }
        self.open = false;
    }

    /// Reset to the initial empty state.
    pub fn clear(&mut self) {
        self.query.clear();
        self.selection = None;
        self.open = false;
    }
}
