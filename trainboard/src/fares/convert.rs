//! Conversion from fares wire types to domain types.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    Crs, FareSearchResult, Journey, JourneyStatus, Leg, LegMode, Station, Ticket, TicketCategory,
    TicketClass, TicketType,
};

use super::types::{
    FareSearchResponse, FareStationDto, JourneyDto, LegDto, ModeDto, StatusDto, TicketCategoryDto,
    TicketClassDto, TicketDto, TicketTypeDto,
};

/// Error converting a parsed response to domain types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A timestamp field was not valid RFC 3339.
    #[error("invalid timestamp in {field}: {value}")]
    BadTimestamp { field: &'static str, value: String },
}

/// Convert a full `/fares` response.
pub fn convert_response(response: FareSearchResponse) -> Result<FareSearchResult, ConversionError> {
    let outbound_journeys = response
        .outbound_journeys
        .into_iter()
        .map(convert_journey)
        .collect::<Result<Vec<_>, _>>()?;

    let inbound_journeys = response
        .inbound_journeys
        .map(|journeys| {
            journeys
                .into_iter()
                .map(convert_journey)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Ok(FareSearchResult {
        outbound_journeys,
        inbound_journeys,
    })
}

fn convert_journey(dto: JourneyDto) -> Result<Journey, ConversionError> {
    Ok(Journey {
        id: dto.journey_id,
        option_token: dto.journey_option_token,
        origin: convert_station(dto.origin_station),
        destination: convert_station(dto.destination_station),
        departure: parse_instant("departureTime", &dto.departure_time)?,
        arrival: parse_instant("arrivalTime", &dto.arrival_time)?,
        duration_mins: dto.journey_duration_in_minutes,
        status: convert_status(dto.status),
        legs: dto
            .legs
            .into_iter()
            .map(convert_leg)
            .collect::<Result<Vec<_>, _>>()?,
        tickets: dto.tickets.into_iter().map(convert_ticket).collect(),
        is_fastest: dto.is_fastest_journey,
    })
}

fn convert_leg(dto: LegDto) -> Result<Leg, ConversionError> {
    match dto {
        LegDto::Trip {
            leg_id,
            mode,
            origin,
            destination,
            duration_in_minutes,
            departure_date_time,
            arrival_date_time,
        } => Ok(Leg::Trip {
            id: leg_id,
            mode: convert_mode(mode),
            origin: convert_station(origin),
            destination: convert_station(destination),
            duration: Duration::minutes(i64::from(duration_in_minutes)),
            departure: parse_instant("departureDateTime", &departure_date_time)?,
            arrival: parse_instant("arrivalDateTime", &arrival_date_time)?,
        }),
        LegDto::Transfer {
            leg_id,
            mode,
            origin,
            destination,
            duration_in_minutes,
        } => Ok(Leg::Transfer {
            id: leg_id,
            mode: convert_mode(mode),
            origin: convert_station(origin),
            destination: convert_station(destination),
            duration: Duration::minutes(i64::from(duration_in_minutes)),
        }),
    }
}

/// Stations in fare results carry no directory id, and the CRS may be
/// empty or malformed for non-bookable calling points. Neither is fatal.
fn convert_station(dto: FareStationDto) -> Station {
    let crs = dto.crs.as_deref().and_then(|code| Crs::parse(code).ok());
    Station::display_only(dto.display_name, crs)
}

fn convert_status(dto: StatusDto) -> JourneyStatus {
    match dto {
        StatusDto::Normal => JourneyStatus::Normal,
        StatusDto::Delayed => JourneyStatus::Delayed,
        StatusDto::Cancelled => JourneyStatus::Cancelled,
        StatusDto::FullyReserved => JourneyStatus::FullyReserved,
    }
}

fn convert_mode(dto: ModeDto) -> LegMode {
    match dto {
        ModeDto::Train => LegMode::Train,
        ModeDto::Bus => LegMode::Bus,
        ModeDto::ScheduledBus => LegMode::ScheduledBus,
        ModeDto::ReplacementBus => LegMode::ReplacementBus,
        ModeDto::Ferry | ModeDto::Hovercraft => LegMode::Ferry,
        ModeDto::Walk | ModeDto::WalkTube | ModeDto::WalkDlr | ModeDto::WalkTubeDlr => {
            LegMode::Walk
        }
        ModeDto::Underground | ModeDto::Lu => LegMode::Underground,
        ModeDto::Taxi => LegMode::Taxi,
        ModeDto::Metro => LegMode::Metro,
        ModeDto::Tramlink => LegMode::Tramlink,
        ModeDto::Tram => LegMode::Tram,
        ModeDto::Dlr | ModeDto::DlrLu => LegMode::Dlr,
        ModeDto::PlatformChange => LegMode::PlatformChange,
        ModeDto::CheckInTime => LegMode::CheckInTime,
        ModeDto::Transfer => LegMode::Transfer,
        ModeDto::Unknown => LegMode::Unknown,
    }
}

fn convert_ticket(dto: TicketDto) -> Ticket {
    Ticket {
        option_token: dto.ticket_option_token,
        price_in_pennies: dto.price_in_pennies,
        ticket_type: match dto.ticket_type {
            TicketTypeDto::Single => TicketType::Single,
            TicketTypeDto::Return => TicketType::Return,
        },
        class: match dto.ticket_class {
            TicketClassDto::Standard => TicketClass::Standard,
            TicketClassDto::First => TicketClass::First,
        },
        category: match dto.ticket_category {
            TicketCategoryDto::Advance => TicketCategory::Advance,
            TicketCategoryDto::Anytime => TicketCategory::Anytime,
            TicketCategoryDto::OffPeak => TicketCategory::OffPeak,
        },
        number_of_tickets: dto.number_of_tickets,
        is_cheapest: dto.is_cheapest_ticket,
    }
}

fn parse_instant(field: &'static str, value: &str) -> Result<DateTime<Utc>, ConversionError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConversionError::BadTimestamp {
            field,
            value: value.to_string(),
        })
}
