//! The search core: station filtering, selection state, and the journey
//! search state machine.
//!
//! Control flow: typed text filters the directory
//! ([`filter_stations`]) -> the user picks a station or a fully typed
//! name is confirmed on blur ([`StationDropdown`]) -> with both ends
//! resolved, [`JourneySearchController`] validates the pair and drives
//! the fare lookup through `Idle -> Loading -> Success | Error`.

mod controller;
mod dropdown;
mod filter;
mod notify;
mod state;

pub use controller::{
    JourneySearchController, JourneyState, MSG_NO_DESTINATION, MSG_NO_ORIGIN, MSG_SAME_STATIONS,
    MSG_SEARCH_FAILED, Slot,
};
pub use dropdown::StationDropdown;
pub use filter::{filter_stations, resolve_exact};
pub use notify::{ChannelNotifier, Notify};
pub use state::SearchState;
