//! Place command handlers
//!
//! Add, list, show, edit and delete catalogued places.

use crate::config::Config;
use crate::error::Result;
use crate::places::store::PlaceUpdate;
use crate::places::{Place, PlaceStore, SortKey};
use clap::Args;
use std::path::PathBuf;

/// Add command arguments
#[derive(Args)]
pub struct AddArgs {
    /// Place name
    pub name: String,

    /// Street address
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Kind of place (Cafe, Museum, ...)
    #[arg(long, short = 't')]
    pub r#type: Option<String>,

    /// Star rating, 0 to 5
    #[arg(long, short = 'r')]
    pub rating: Option<f64>,

    /// Photo file to attach
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// List command arguments
#[derive(Args)]
pub struct ListArgs {
    /// Sort by date, name or rating
    #[arg(long, short = 's', default_value_t = SortKey::Date)]
    pub sort: SortKey,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,

    /// Only places whose name or address contains this text
    #[arg(long, short = 'q')]
    pub search: Option<String>,
}

/// Edit command arguments
#[derive(Args)]
pub struct EditArgs {
    /// Place ID (or unique prefix)
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, short = 'l')]
    pub location: Option<String>,

    #[arg(long, short = 't')]
    pub r#type: Option<String>,

    #[arg(long, short = 'r')]
    pub rating: Option<f64>,

    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Open the place catalogue named by the config, or the default one
pub fn open_store(config: &Config) -> Result<PlaceStore> {
    match config.places_file() {
        Some(path) => PlaceStore::load_from(path),
        None => PlaceStore::load(),
    }
}

/// Add a place
pub fn add(args: AddArgs) -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;

    let mut place = Place::new(args.name)?;
    if let Some(location) = args.location {
        place = place.with_location(location);
    }
    if let Some(kind) = args.r#type {
        place = place.with_type(kind);
    }
    if let Some(rating) = args.rating {
        place = place.with_rating(rating)?;
    }
    if let Some(path) = args.image {
        place = place.with_image(std::fs::read(&path)?);
    }

    let id = place.id.clone();
    store.add(place);
    store.save()?;

    println!("Added place: {}", id);
    Ok(())
}

/// List places
pub fn list(args: ListArgs) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config)?;

    if store.is_empty() {
        println!("No places.");
        return Ok(());
    }

    let places = store.search(args.search.as_deref(), args.sort, !args.desc);
    if places.is_empty() {
        println!("No matching places.");
        return Ok(());
    }

    for place in places {
        println!(
            "  {} - {} [{}] {}\n    {}\n",
            short_id(&place.id),
            place.name,
            place.place_type.as_deref().unwrap_or("-"),
            stars(place.rating),
            place.location.as_deref().unwrap_or("(no address)"),
        );
    }

    Ok(())
}

/// Show a place
pub fn show(id: &str) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config)?;
    let place = store.find(id)?;

    println!("Place: {}", place.name);
    println!("ID: {}", place.id);
    if let Some(kind) = &place.place_type {
        println!("Type: {}", kind);
    }
    if let Some(location) = &place.location {
        println!("Location: {}", location);
    }
    println!("Rating: {} ({})", stars(place.rating), place.rating);
    println!("Added: {}", place.date.to_rfc3339());
    if let Some(image) = &place.image_data {
        println!("Photo: {} bytes", image.len());
    }

    Ok(())
}

/// Edit a place
pub fn edit(args: EditArgs) -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;
    let id = store.find(&args.id)?.id.clone();

    let image_data = match args.image {
        Some(path) => Some(std::fs::read(&path)?),
        None => None,
    };

    let place = store.update(
        &id,
        PlaceUpdate {
            name: args.name,
            location: args.location,
            place_type: args.r#type,
            image_data,
            rating: args.rating,
        },
    )?;
    println!("Updated place: {} ({})", place.name, place.id);

    store.save()?;
    Ok(())
}

/// Delete a place
pub fn delete(id: &str) -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;
    let full_id = store.find(id)?.id.clone();

    if let Some(place) = store.delete(&full_id) {
        store.save()?;
        println!("Deleted place: {} ({})", place.name, full_id);
    }
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn stars(rating: f64) -> String {
    let full = rating.round().clamp(0.0, crate::places::MAX_RATING) as usize;
    format!("{}{}", "*".repeat(full), ".".repeat(5 - full))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0d4e7f2a-1111-2222"), "0d4e7f2a");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(0.0), ".....");
        assert_eq!(stars(3.4), "***..");
        assert_eq!(stars(5.0), "*****");
    }

    #[test]
    fn test_open_store_honours_config_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mine.json");

        let mut config = Config::default();
        config.storage.places_file = Some(path.clone());

        let mut store = open_store(&config).unwrap();
        store.add(Place::new("Bolshoi").unwrap());
        store.save().unwrap();

        assert!(path.exists());
        assert_eq!(open_store(&config).unwrap().len(), 1);
    }
}
