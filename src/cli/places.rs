//! Places command handler
//!
//! List, add and remove saved places.

use crate::candidate::SavedPlace;
use crate::config::Config;
use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::places::PlaceStore;
use clap::{Args, Subcommand};

/// Places command arguments
#[derive(Args)]
pub struct PlacesArgs {
    #[command(subcommand)]
    pub command: Option<PlacesCommand>,
}

/// Places subcommands
#[derive(Subcommand)]
pub enum PlacesCommand {
    /// List saved places
    List,
    /// Save a new place
    Add {
        /// Place name
        name: String,

        /// Latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Street address
        #[arg(long)]
        address: Option<String>,

        /// City
        #[arg(long)]
        city: Option<String>,
    },
    /// Delete a saved place
    Remove {
        /// Place ID
        id: String,
    },
    /// Show the store file path
    Path,
}

/// Run the places command
pub fn run(args: PlacesArgs) -> Result<()> {
    let config = Config::load()?;
    let mut store = PlaceStore::load(&config.places)?;

    match args.command.unwrap_or(PlacesCommand::List) {
        PlacesCommand::List => list_places(&store),
        PlacesCommand::Add {
            name,
            lat,
            lng,
            address,
            city,
        } => {
            let mut place = SavedPlace::new(
                uuid::Uuid::new_v4().to_string(),
                name,
                Coordinate::new(lat, lng),
            );
            place.address = address;
            place.city = city;
            place.created_at = Some(chrono::Utc::now());

            store.add(place.clone())?;
            store.save()?;
            println!("Saved {} ({})", place.name, place.id);
            Ok(())
        }
        PlacesCommand::Remove { id } => match store.remove(&id) {
            Some(place) => {
                store.save()?;
                println!("Removed {} ({})", place.name, place.id);
                Ok(())
            }
            None => Err(Error::Store(format!("Saved place not found: {}", id))),
        },
        PlacesCommand::Path => {
            println!("{}", store.path().display());
            Ok(())
        }
    }
}

fn list_places(store: &PlaceStore) -> Result<()> {
    if store.is_empty() {
        println!("No saved places.");
        return Ok(());
    }

    println!("Saved places ({}):\n", store.len());
    for place in store.places() {
        println!(
            "  {} - {} x{}\n    {}{}\n",
            place.id,
            place.name,
            place.entry_count,
            place.coordinate,
            place
                .address
                .as_deref()
                .map(|a| format!(" | {}", a))
                .unwrap_or_default(),
        );
    }
    Ok(())
}
