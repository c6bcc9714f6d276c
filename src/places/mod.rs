//! Saved-place storage
//!
//! Places the user has saved are kept in a JSON file in the XDG data
//! directory (~/.local/share/place-resolver/places.json). The resolution
//! engine only reads them through `SavedPlaceStore`.

use crate::candidate::SavedPlace;
use crate::config::defaults::{APP_DIR_NAME, PLACES_FILE_NAME};
use crate::config::PlacesConfig;
use crate::enrich::ResolvedLocation;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read access to saved places
pub trait SavedPlaceStore: Send + Sync {
    fn list_saved_places(&self) -> Result<Vec<SavedPlace>>;
}

impl SavedPlaceStore for [SavedPlace] {
    fn list_saved_places(&self) -> Result<Vec<SavedPlace>> {
        Ok(self.to_vec())
    }
}

/// File-backed saved-place store
#[derive(Debug)]
pub struct PlaceStore {
    places: Vec<SavedPlace>,
    path: PathBuf,
}

impl PlaceStore {
    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Store("Could not determine data directory".to_string()))
    }

    /// Path of the store file, honoring a configured override
    pub fn store_path(config: &PlacesConfig) -> Result<PathBuf> {
        match &config.path {
            Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
            _ => Ok(Self::data_dir()?.join(PLACES_FILE_NAME)),
        }
    }

    /// Load the store named by the config
    pub fn load(config: &PlacesConfig) -> Result<Self> {
        Self::load_from(Self::store_path(config)?)
    }

    /// Load the store from a specific path; a missing file is an empty store
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let places = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Store(format!("Failed to read places file: {}", e)))?;

            serde_json::from_str(&content)
                .map_err(|e| Error::Store(format!("Failed to parse places file: {}", e)))?
        } else {
            Vec::new()
        };

        Ok(Self { places, path })
    }

    /// Save places to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("Failed to create places directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(&self.places)
            .map_err(|e| Error::Store(format!("Failed to serialize places: {}", e)))?;

        fs::write(&self.path, content)
            .map_err(|e| Error::Store(format!("Failed to write places file: {}", e)))?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a place, rejecting invalid coordinates and duplicate ids
    pub fn add(&mut self, place: SavedPlace) -> Result<()> {
        place.coordinate.validate()?;
        if self.get(&place.id).is_some() {
            return Err(Error::Store(format!("Place already exists: {}", place.id)));
        }
        self.places.push(place);
        Ok(())
    }

    /// Save a committed location as a new place
    pub fn save_resolved(&mut self, resolved: &ResolvedLocation) -> Result<SavedPlace> {
        let name = resolved
            .name
            .clone()
            .or_else(|| resolved.address.clone())
            .unwrap_or_else(|| resolved.coordinate.to_string());

        let place = SavedPlace {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            coordinate: resolved.coordinate,
            address: resolved.address.clone(),
            city: resolved.city.clone(),
            region: resolved.region.clone(),
            country: resolved.country.clone(),
            postal_code: resolved.postal_code.clone(),
            entry_count: 1,
            created_at: Some(chrono::Utc::now()),
        };

        self.add(place.clone())?;
        Ok(place)
    }

    /// Count one more entry against a saved place
    pub fn record_use(&mut self, id: &str) -> bool {
        match self.places.iter_mut().find(|p| p.id == id) {
            Some(place) => {
                place.entry_count = place.entry_count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Get all places
    pub fn places(&self) -> &[SavedPlace] {
        &self.places
    }

    /// Get place by ID
    pub fn get(&self, id: &str) -> Option<&SavedPlace> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Remove place by ID
    pub fn remove(&mut self, id: &str) -> Option<SavedPlace> {
        let idx = self.places.iter().position(|p| p.id == id)?;
        Some(self.places.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl SavedPlaceStore for PlaceStore {
    fn list_saved_places(&self) -> Result<Vec<SavedPlace>> {
        Ok(self.places.clone())
    }
}
