//! Journey and fare types.
//!
//! A `Journey` is one option returned by the fare-search API: a complete
//! trip from origin to destination made up of legs (trips and transfers),
//! with the ticket options available for it.

use chrono::{DateTime, Duration, Utc};

use super::Station;

/// Running status of a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JourneyStatus {
    Normal,
    Delayed,
    Cancelled,
    FullyReserved,
}

/// Transport mode of a single leg.
///
/// The fares API distinguishes a long tail of modes; most journeys only
/// ever use `Train`, `Walk` and `Transfer`. `Unknown` absorbs anything the
/// API adds later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegMode {
    Train,
    Bus,
    ScheduledBus,
    ReplacementBus,
    Ferry,
    Walk,
    Underground,
    Taxi,
    Metro,
    Tramlink,
    Tram,
    Dlr,
    PlatformChange,
    CheckInTime,
    Hovercraft,
    Transfer,
    Unknown,
}

/// One segment of a journey: a timetabled trip or an untimed transfer.
///
/// Mirrors the two leg shapes the fares API returns: `trip` legs carry
/// departure and arrival instants, `transfer` legs only a duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leg {
    /// A timetabled vehicle movement.
    Trip {
        id: String,
        mode: LegMode,
        origin: Station,
        destination: Station,
        duration: Duration,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },
    /// An interchange: a walk, platform change, or similar.
    Transfer {
        id: String,
        mode: LegMode,
        origin: Station,
        destination: Station,
        duration: Duration,
    },
}

impl Leg {
    /// Returns the origin station of this leg.
    pub fn origin(&self) -> &Station {
        match self {
            Leg::Trip { origin, .. } | Leg::Transfer { origin, .. } => origin,
        }
    }

    /// Returns the destination station of this leg.
    pub fn destination(&self) -> &Station {
        match self {
            Leg::Trip { destination, .. } | Leg::Transfer { destination, .. } => destination,
        }
    }

    /// Returns the duration of this leg.
    pub fn duration(&self) -> Duration {
        match self {
            Leg::Trip { duration, .. } | Leg::Transfer { duration, .. } => *duration,
        }
    }

    /// Returns true if this is a timetabled trip leg.
    pub fn is_trip(&self) -> bool {
        matches!(self, Leg::Trip { .. })
    }

    /// Returns true if this is a transfer leg.
    pub fn is_transfer(&self) -> bool {
        matches!(self, Leg::Transfer { .. })
    }
}

/// Whether a ticket covers one way or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketType {
    Single,
    Return,
}

/// Travel class of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketClass {
    Standard,
    First,
}

/// Fare category of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketCategory {
    Advance,
    Anytime,
    OffPeak,
}

/// One purchasable ticket option for a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Opaque token used to book this option.
    pub option_token: String,
    /// Total price in pennies.
    pub price_in_pennies: u32,
    pub ticket_type: TicketType,
    pub class: TicketClass,
    pub category: TicketCategory,
    /// How many travellers this price covers.
    pub number_of_tickets: u32,
    /// Marked by the API as the cheapest option for the journey.
    pub is_cheapest: bool,
}

impl Ticket {
    /// Price formatted for display, e.g. "£23.50".
    pub fn price_pounds(&self) -> String {
        format!(
            "£{}.{:02}",
            self.price_in_pennies / 100,
            self.price_in_pennies % 100
        )
    }
}

/// One journey option returned by the fare search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    /// Opaque identifier for this journey.
    pub id: String,
    /// Opaque token used to select this journey when booking.
    pub option_token: String,
    pub origin: Station,
    pub destination: Station,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    /// End-to-end duration as reported by the API.
    pub duration_mins: u32,
    pub status: JourneyStatus,
    /// Ordered legs, first departs the origin, last arrives at the
    /// destination.
    pub legs: Vec<Leg>,
    /// Ordered ticket options.
    pub tickets: Vec<Ticket>,
    /// Marked by the API as the fastest option among the returned results.
    pub is_fastest: bool,
}

impl Journey {
    /// Number of changes: trip legs beyond the first.
    ///
    /// Transfers between trips are not counted as changes in their own
    /// right; a direct service has zero.
    pub fn changes(&self) -> usize {
        self.legs.iter().filter(|l| l.is_trip()).count().saturating_sub(1)
    }

    /// The cheapest ticket option, preferring the API's own flag.
    pub fn cheapest_ticket(&self) -> Option<&Ticket> {
        self.tickets
            .iter()
            .find(|t| t.is_cheapest)
            .or_else(|| self.tickets.iter().min_by_key(|t| t.price_in_pennies))
    }

    /// End-to-end duration as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_mins))
    }
}

/// The full result of a fare search.
///
/// Inbound journeys are populated for round-trip searches. The search core
/// only ever surfaces the outbound list; the inbound list is carried for a
/// future round-trip view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareSearchResult {
    pub outbound_journeys: Vec<Journey>,
    pub inbound_journeys: Option<Vec<Journey>>,
}
