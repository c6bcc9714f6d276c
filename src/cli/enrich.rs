//! Enrich command handler
//!
//! Reverse geocodes a tapped point or a saved place and prints each status
//! transition, optionally saving the committed location.

use crate::candidate::source::{from_saved, from_tap};
use crate::candidate::LocationCandidate;
use crate::config::Config;
use crate::coord::Coordinate;
use crate::enrich::enricher::Enricher;
use crate::enrich::selection::Selection;
use crate::enrich::{EnrichmentStatus, EnrichmentUpdate};
use crate::error::{Error, Result};
use crate::geo::get_provider;
use crate::places::PlaceStore;
use clap::Args;

/// Enrich command arguments
#[derive(Args)]
pub struct EnrichArgs {
    /// Latitude of the point to enrich
    #[arg(long, allow_hyphen_values = true, conflicts_with = "saved", requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude of the point to enrich
    #[arg(long, allow_hyphen_values = true, conflicts_with = "saved", requires = "lat")]
    pub lng: Option<f64>,

    /// Name of the point of interest at the coordinate
    #[arg(long, conflicts_with = "saved")]
    pub name: Option<String>,

    /// Enrich a saved place by id instead of a coordinate
    #[arg(long)]
    pub saved: Option<String>,

    /// Replace the resolved name
    #[arg(long)]
    pub rename: Option<String>,

    /// Replace the resolved street address
    #[arg(long)]
    pub address: Option<String>,

    /// Save the result to the place store
    #[arg(long)]
    pub save: bool,

    /// Print updates as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// Run the enrich command
pub async fn run(args: EnrichArgs) -> Result<()> {
    let config = Config::load()?;
    let mut store = PlaceStore::load(&config.places)?;
    let candidate = pick_candidate(&args, &store)?;

    let enricher =
        Enricher::new(get_provider(&config.geocode)?).with_timeout(config.geocode.timeout());

    let mut selection = Selection::new();
    let ticket = selection.activate(candidate);
    print_update(&selection.update(), args.json)?;

    if let Some(ticket) = ticket {
        enricher.run(&mut selection, ticket).await;
        print_update(&selection.update(), args.json)?;
    }

    if args.rename.is_some() || args.address.is_some() {
        selection.edit(args.rename.clone(), args.address.clone());
        print_update(&selection.update(), args.json)?;
    }

    if !args.save {
        return Ok(());
    }

    let Some(resolved) = selection.commit() else {
        return Err(Error::Store("Nothing to save".to_string()));
    };

    match resolved.saved_entry_id.as_deref() {
        Some(id) if store.record_use(id) => {
            eprintln!("Recorded another use of saved place {}", id);
        }
        _ => {
            let place = store.save_resolved(&resolved)?;
            eprintln!("Saved place {} ({})", place.name, place.id);
        }
    }
    store.save()
}

fn pick_candidate(args: &EnrichArgs, store: &PlaceStore) -> Result<LocationCandidate> {
    if let Some(id) = &args.saved {
        let place = store
            .get(id)
            .ok_or_else(|| Error::Store(format!("Saved place not found: {}", id)))?;
        return from_saved(std::slice::from_ref(place), place.coordinate)
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidCoordinates(format!("Saved place {} has bad coordinates", id)));
    }

    let (Some(lat), Some(lng)) = (args.lat, args.lng) else {
        return Err(Error::InvalidCoordinates(
            "Provide --lat and --lng, or --saved".to_string(),
        ));
    };
    let coordinate = Coordinate::new(lat, lng);
    coordinate.validate()?;

    from_tap(Some(coordinate), None, args.name.as_deref())
        .ok_or_else(|| Error::InvalidCoordinates(coordinate.to_string()))
}

fn print_update(update: &EnrichmentUpdate, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(update)?);
        return Ok(());
    }

    match (update.status, &update.resolved) {
        (EnrichmentStatus::Failed, resolved) => {
            println!(
                "[{}] {}",
                update.status,
                update.error.as_deref().unwrap_or("unknown error")
            );
            if let Some(resolved) = resolved {
                println!("  Keeping: {}", resolved.summary());
            }
        }
        (status, Some(resolved)) => println!("[{}] {}", status, resolved.summary()),
        (status, None) => println!("[{}]", status),
    }
    Ok(())
}
