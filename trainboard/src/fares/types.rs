//! Wire types for the fares API.
//!
//! These mirror the JSON shape of the `/fares` endpoint exactly and are
//! converted to domain types in [`convert`](super::convert). Stations
//! inside fare results are serialised differently from the directory:
//! `{ displayName, crs, nlc }`, with `crs` possibly empty.

use serde::Deserialize;

/// Top-level `/fares` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareSearchResponse {
    pub outbound_journeys: Vec<JourneyDto>,
    #[serde(default)]
    pub inbound_journeys: Option<Vec<JourneyDto>>,
}

/// A station as embedded in fare results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareStationDto {
    pub display_name: String,
    #[serde(default)]
    pub crs: Option<String>,
    /// National Location Code; present on the wire but unused here.
    #[serde(default)]
    pub nlc: Option<String>,
}

/// Journey running status.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusDto {
    Normal,
    Delayed,
    Cancelled,
    FullyReserved,
}

/// Transport mode of a leg. The API serialises these as
/// SCREAMING_SNAKE_CASE names; anything unrecognised collapses to
/// `Unknown` rather than failing the whole response.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModeDto {
    ScheduledBus,
    ReplacementBus,
    Bus,
    Train,
    Ferry,
    Walk,
    Underground,
    Taxi,
    Metro,
    Tramlink,
    PlatformChange,
    CheckInTime,
    Hovercraft,
    Transfer,
    Tram,
    Dlr,
    Lu,
    DlrLu,
    WalkTube,
    WalkDlr,
    WalkTubeDlr,
    #[serde(other)]
    Unknown,
}

/// A leg, discriminated by the `type` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum LegDto {
    #[serde(rename = "trip", rename_all = "camelCase")]
    Trip {
        leg_id: String,
        mode: ModeDto,
        origin: FareStationDto,
        destination: FareStationDto,
        duration_in_minutes: u32,
        departure_date_time: String,
        arrival_date_time: String,
    },
    #[serde(rename = "transfer", rename_all = "camelCase")]
    Transfer {
        leg_id: String,
        mode: ModeDto,
        origin: FareStationDto,
        destination: FareStationDto,
        duration_in_minutes: u32,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum TicketTypeDto {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "return")]
    Return,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketClassDto {
    Standard,
    First,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategoryDto {
    Advance,
    Anytime,
    OffPeak,
}

/// One purchasable ticket option.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub ticket_option_token: String,
    pub price_in_pennies: u32,
    pub ticket_type: TicketTypeDto,
    pub ticket_class: TicketClassDto,
    pub ticket_category: TicketCategoryDto,
    pub number_of_tickets: u32,
    pub is_cheapest_ticket: bool,
}

/// One journey option.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    pub journey_option_token: String,
    pub journey_id: String,
    pub origin_station: FareStationDto,
    pub destination_station: FareStationDto,
    pub departure_time: String,
    pub arrival_time: String,
    pub status: StatusDto,
    pub legs: Vec<LegDto>,
    pub tickets: Vec<TicketDto>,
    pub journey_duration_in_minutes: u32,
    pub is_fastest_journey: bool,
}
