use std::sync::Arc;
use std::time::Duration;

use trainboard::cache::{CachedFareSource, FareCacheConfig};
use trainboard::fares::{FareClient, FareClientConfig};
use trainboard::search::{ChannelNotifier, JourneySearchController, SearchState, Slot};
use trainboard::stations::{StationCache, StationCacheConfig, StationClient, StationClientConfig, StationDirectory};

const STATION_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("TRAINBOARD_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: TRAINBOARD_API_KEY not set. API calls will fail.");
        String::new()
    });

    let mut args = std::env::args().skip(1);
    let (Some(origin_query), Some(destination_query)) = (args.next(), args.next()) else {
        eprintln!("Usage: trainboard <origin> <destination>");
        eprintln!("       (station names or name fragments, e.g. \"kings cross\" edinburgh)");
        std::process::exit(2);
    };

    // Load the station directory: disk cache first, API on a miss.
    let station_client = StationClient::new(StationClientConfig::new(&api_key))
        .expect("Failed to create stations client");
    let station_cache = StationCache::new(StationCacheConfig::default());

    let directory = match station_cache.load() {
        Some(stations) => {
            println!("Loaded {} stations from cache", stations.len());
            StationDirectory::from_cached(station_client, stations)
        }
        None => {
            println!("Fetching stations...");
            let directory = StationDirectory::fetch(station_client.clone())
                .await
                .expect("Failed to fetch stations");
            // Re-fetch the raw list for the cache; refresh keeps the
            // directory itself current.
            if let Ok(stations) = station_client.fetch_all().await
                && let Err(e) = station_cache.save(&stations)
            {
                eprintln!("Warning: failed to write station cache: {e}");
            }
            directory
        }
    };
    println!("Directory holds {} bookable stations", directory.len().await);

    // Keep the directory current for as long as the process lives.
    let directory_refresh = directory.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATION_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match directory_refresh.refresh().await {
                Ok(count) => println!("Refreshed station directory: {count} stations"),
                Err(e) => eprintln!("Failed to refresh station directory: {e}"),
            }
        }
    });

    // Fares client behind the response cache.
    let fare_client =
        FareClient::new(FareClientConfig::new(&api_key)).expect("Failed to create fares client");
    let fares = CachedFareSource::new(Arc::new(fare_client), &FareCacheConfig::default());

    let (notifier, mut notifications) = ChannelNotifier::channel();
    let mut controller = JourneySearchController::new(Arc::new(fares), Arc::new(notifier));

    // Resolve each query the way the UI would: type, then blur; if that
    // doesn't confirm a selection, fall back to the first candidate.
    let snapshot = directory.snapshot().await;
    for (slot, query) in [(Slot::Origin, &origin_query), (Slot::Destination, &destination_query)] {
        controller.on_query_changed(slot, query.clone());
        controller.on_focus_lost(slot, &snapshot);

        if controller.slot(slot).selection().is_none() {
            match controller.slot(slot).candidates(&snapshot).first() {
                Some(station) => {
                    let station = (*station).clone();
                    println!("Using {} for {:?}", station, query);
                    controller.on_station_picked(slot, station);
                }
                None => {
                    eprintln!("No station matches {:?}", query);
                    std::process::exit(1);
                }
            }
        }
    }

    let mut state = controller.subscribe();
    controller.request_search_selected();

    // Surface any validation message, then wait for the search to settle.
    if let Ok(message) = notifications.try_recv() {
        eprintln!("{message}");
        std::process::exit(1);
    }

    let settled = state
        .wait_for(|s| s.is_success() || s.is_error())
        .await
        .expect("controller dropped");

    match &*settled {
        SearchState::Success(journeys) => {
            if journeys.is_empty() {
                println!("No journeys found. Please try different stations.");
                return;
            }
            for journey in journeys {
                let fastest = if journey.is_fastest { " (fastest)" } else { "" };
                let price = journey
                    .cheapest_ticket()
                    .map(|t| t.price_pounds())
                    .unwrap_or_else(|| "no tickets".to_string());
                println!(
                    "{} -> {}  dep {}  arr {}  {} change(s)  from {}{}",
                    journey.origin.name,
                    journey.destination.name,
                    journey.departure.format("%H:%M"),
                    journey.arrival.format("%H:%M"),
                    journey.changes(),
                    price,
                    fastest,
                );
            }
        }
        SearchState::Error(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
        // wait_for only returns success or error.
        SearchState::Idle | SearchState::Loading => unreachable!(),
    }
}
