//! Place storage
//!
//! Stores the place catalogue in a JSON file.
//! Default location is the XDG data directory (~/.local/share/my-places/).

use crate::config::defaults::{APP_DIR_NAME, PLACES_FILE_NAME};
use crate::error::{Error, Result};
use crate::places::{Place, SortKey};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Changes applied to an existing place
#[derive(Debug, Clone, Default)]
pub struct PlaceUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub place_type: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub rating: Option<f64>,
}

/// File-backed place catalogue
///
/// Entries are kept in insertion order; queries sort a view of them.
#[derive(Debug)]
pub struct PlaceStore {
    places: Vec<Place>,
    path: PathBuf,
}

impl PlaceStore {
    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Storage("Could not determine data directory".to_string()))
    }

    /// Get the default store file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(PLACES_FILE_NAME))
    }

    /// Load the store from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load the store from a specific path
    ///
    /// A missing file is an empty store.
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let places: Vec<Place> = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Storage(format!("Failed to read {}: {}", path.display(), e))
            })?;

            serde_json::from_str(&content).map_err(|e| {
                Error::Storage(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Vec::new()
        };

        for place in &places {
            place.validate().map_err(|e| {
                Error::Storage(format!("Invalid place in {}: {}", path.display(), e))
            })?;
        }

        debug!("Loaded {} places from {}", places.len(), path.display());
        Ok(Self { places, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.places)?;

        fs::write(&self.path, content).map_err(|e| {
            Error::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }

    /// Add a place
    pub fn add(&mut self, place: Place) {
        self.places.push(place);
    }

    /// Delete a place by id
    pub fn delete(&mut self, id: &str) -> Option<Place> {
        let idx = self.places.iter().position(|p| p.id == id)?;
        Some(self.places.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Find a place by id prefix
    ///
    /// Errors if the prefix is ambiguous or matches nothing.
    pub fn find(&self, id_prefix: &str) -> Result<&Place> {
        let mut matches = self.places.iter().filter(|p| p.id.starts_with(id_prefix));
        match (matches.next(), matches.next()) {
            (Some(place), None) => Ok(place),
            (Some(_), Some(_)) => Err(Error::Storage(format!("Ambiguous place id: {}", id_prefix))),
            (None, _) => Err(Error::Storage(format!("Place not found: {}", id_prefix))),
        }
    }

    /// Edit a place in place
    pub fn update(&mut self, id: &str, update: PlaceUpdate) -> Result<&Place> {
        let place = self
            .places
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::Storage(format!("Place not found: {}", id)))?;

        if update.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
            return Err(Error::InvalidPlace("name is required".to_string()));
        }
        if let Some(rating) = update.rating {
            place.set_rating(rating)?;
        }
        if let Some(name) = update.name {
            place.name = name;
        }
        if let Some(location) = update.location {
            place.location = Some(location);
        }
        if let Some(place_type) = update.place_type {
            place.place_type = Some(place_type);
        }
        if let Some(image_data) = update.image_data {
            place.image_data = Some(image_data);
        }

        Ok(place)
    }

    /// All places sorted by `key`
    ///
    /// The sort is stable: places that compare equal keep insertion order,
    /// in both directions.
    pub fn query(&self, key: SortKey, ascending: bool) -> Vec<&Place> {
        let mut view: Vec<&Place> = self.places.iter().collect();
        view.sort_by(|a, b| {
            let ord = compare(a, b, key);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        view
    }

    /// Places whose name or location contains `text`, case-insensitively
    pub fn filter(&self, text: &str) -> Vec<&Place> {
        self.places.iter().filter(|p| p.matches(text)).collect()
    }

    /// Filtered and sorted in one go
    pub fn search(&self, text: Option<&str>, key: SortKey, ascending: bool) -> Vec<&Place> {
        match text.filter(|t| !t.is_empty()) {
            Some(text) => self
                .query(key, ascending)
                .into_iter()
                .filter(|p| p.matches(text))
                .collect(),
            None => self.query(key, ascending),
        }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

fn compare(a: &Place, b: &Place, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Rating => a.rating.total_cmp(&b.rating),
    }
}
