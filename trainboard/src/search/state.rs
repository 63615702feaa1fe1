//! Tri-state search lifecycle.

/// Lifecycle of an asynchronous search, parameterised by the success data
/// and error types.
///
/// Exactly one variant holds at any time; there is no "loading but still
/// showing stale data" combination. Starting a new search replaces the
/// previous result with `Loading` immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState<T, E> {
    /// No search attempted yet.
    Idle,
    /// A search is in flight.
    Loading,
    /// The last search completed with data.
    Success(T),
    /// The last search failed.
    Error(E),
}

impl<T, E> SearchState<T, E> {
    pub fn is_idle(&self) -> bool {
        matches!(self, SearchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SearchState::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SearchState::Error(_))
    }

    /// Returns the success data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            SearchState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the error, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            SearchState::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl<T, E> Default for SearchState<T, E> {
    fn default() -> Self {
        SearchState::Idle
    }
}
