//! Places of interest
//!
//! A [`Place`] is a flat record: no relationships, identified by a uuid,
//! created on the edit screen and deleted explicitly by the user.

pub mod store;

pub use store::PlaceStore;

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest star rating
pub const MAX_RATING: f64 = 5.0;

/// A catalogued place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,

    pub name: String,

    /// Free-text address, geocoded on demand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Kind of place ("Cafe", "Museum", ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,

    /// Encoded photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<Vec<u8>>,

    /// Star rating, 0 to 5
    #[serde(default)]
    pub rating: f64,

    /// Creation time; default sort key
    pub date: DateTime<Utc>,
}

impl Place {
    /// Create a place stamped with the current time
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidPlace("name is required".to_string()));
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            location: None,
            place_type: None,
            image_data: None,
            rating: 0.0,
            date: Utc::now(),
        })
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type = Some(place_type.into());
        self
    }

    pub fn with_image(mut self, image_data: Vec<u8>) -> Self {
        self.image_data = Some(image_data);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Result<Self> {
        self.set_rating(rating)?;
        Ok(self)
    }

    pub fn set_rating(&mut self, rating: f64) -> Result<()> {
        check_rating(rating)?;
        self.rating = rating;
        Ok(())
    }

    /// Check a place read from outside, such as the store file
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidPlace(format!("place {} has no name", self.id)));
        }
        check_rating(self.rating)
    }

    /// Case-insensitive substring match on name or location
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .location
                .as_ref()
                .is_some_and(|l| l.to_lowercase().contains(&needle))
    }
}

fn check_rating(rating: f64) -> Result<()> {
    // NaN fails the range check too
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(Error::InvalidPlace(format!(
            "rating {} is out of range [0, {}]",
            rating, MAX_RATING
        )));
    }
    Ok(())
}

/// Field the place list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    Name,
    Rating,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Name => write!(f, "name"),
            Self::Rating => write!(f, "rating"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            "rating" => Ok(Self::Rating),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_name_required() {
        assert!(Place::new("").is_err());
        assert!(Place::new("  ").is_err());
        assert!(Place::new("Pushkin Cafe").is_ok());
    }

    #[test]
    fn test_rating_range() {
        let place = Place::new("Cafe").unwrap();
        assert!(place.clone().with_rating(5.0).is_ok());
        assert!(place.clone().with_rating(0.0).is_ok());
        assert!(place.clone().with_rating(5.5).is_err());
        assert!(place.with_rating(-1.0).is_err());
    }

    #[test]
    fn test_validate_loaded_place() {
        let mut place = Place::new("Cafe").unwrap();
        assert!(place.validate().is_ok());

        place.rating = f64::NAN;
        assert!(place.validate().is_err());

        place.rating = 3.0;
        place.name = String::new();
        assert!(place.validate().is_err());
    }

    #[test]
    fn test_matches_name_or_location() {
        let place = Place::new("Pushkin Cafe")
            .unwrap()
            .with_location("Tverskoy Blvd, 26A");

        assert!(place.matches("pushkin"));
        assert!(place.matches("TVERSKOY"));
        assert!(!place.matches("museum"));

        let no_location = Place::new("Bolshoi").unwrap();
        assert!(!no_location.matches("tverskoy"));
    }

    #[test]
    fn test_type_serialized_as_type() {
        let place = Place::new("Bolshoi").unwrap().with_type("Theatre");
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["type"], "Theatre");
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::from_str("Rating"), Ok(SortKey::Rating));
        assert_eq!(SortKey::from_str("name"), Ok(SortKey::Name));
        assert!(SortKey::from_str("distance").is_err());
        assert_eq!(SortKey::default(), SortKey::Date);
    }
}
