//! Load a small synthetic catalog and run a deduplicated proximity search.
//!
//! Run with: cargo run --example nearby_demo

use std::sync::Arc;

use quakescan_core::config::SearchConfig;
use quakescan_core::models::EventRecord;
use quakescan_search::{EventCatalog, EventSearch, NearbyPlan};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let catalog = Arc::new(EventCatalog::new());
    catalog.load(vec![
        EventRecord::new(38.32, 142.37)
            .with_magnitude(7.1)
            .with_title("M 7.1 - off the Pacific coast")
            .with_place("off the Pacific coast")
            .with_tsunami(true),
        EventRecord::new(38.41, 142.51)
            .with_magnitude(5.2)
            .with_title("M 5.2 - aftershock")
            .with_place("off the Pacific coast"),
        EventRecord::new(35.68, 139.65)
            .with_magnitude(4.0)
            .with_title("M 4.0 - near Tokyo")
            .with_place("near Tokyo"),
        EventRecord::new(61.02, -147.65)
            .with_magnitude(6.3)
            .with_title("M 6.3 - Prince William Sound")
            .with_place("Prince William Sound"),
    ])?;

    let config = SearchConfig::with_defaults().load_from_env();
    config.validate()?;
    let search = EventSearch::new(catalog, config);

    let plan = NearbyPlan::new(36.0, 140.0)
        .with_radius_km(600.0)
        .with_min_separation_km(100.0);
    let outcome = search.execute(&plan)?;

    println!(
        "{} matches within radius, {} after deduplication:",
        outcome.total_matches,
        outcome.events.len()
    );
    for hit in &outcome.events {
        println!(
            "  {:>8.2} km  {}{}",
            hit.distance_km,
            hit.event.title,
            if hit.event.tsunami { "  [tsunami]" } else { "" }
        );
    }

    Ok(())
}
