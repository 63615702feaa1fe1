//! Core domain types: stations, journeys, fares.

mod journey;
mod station;

pub use journey::{
    FareSearchResult, Journey, JourneyStatus, Leg, LegMode, Ticket, TicketCategory, TicketClass,
    TicketType,
};
pub use station::{Crs, InvalidCrs, Station};
