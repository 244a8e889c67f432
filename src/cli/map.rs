//! Map command handlers
//!
//! Drive a [`MapManager`] from the terminal: locate a place, look up the
//! address at a coordinate, or get directions.

use crate::cli::console::{ConsoleAlerts, ConsoleMap};
use crate::cli::places::open_store;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::url::UrlFormatter;
use crate::format::{available_formats, get_formatter, RouteReport};
use crate::geo::get_ip_locator;
use crate::geo::nominatim::NominatimBackend;
use crate::location::{AlertPresenter, LocationProvider, StaticLocation, SurfaceReady};
use crate::map::{MapManager, MapMode, MapSettings};
use crate::route::osrm::OsrmBackend;
use crate::route::RouteOutcome;
use clap::Args;
use std::sync::Arc;
use tracing::debug;

type Screen = MapManager<NominatimBackend, OsrmBackend>;

/// Address command arguments
#[derive(Args)]
pub struct AddressArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
}

/// Route command arguments
#[derive(Args)]
pub struct RouteArgs {
    /// Place ID (or unique prefix)
    pub id: Option<String>,

    /// Starting latitude
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Starting longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Start from the current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Map URL provider (url format only)
    #[arg(long)]
    pub provider: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Build a map screen on the console surfaces
///
/// The returned signal must be marked ready before alerts are shown.
fn open_screen(
    config: &Config,
    mode: MapMode,
    location: StaticLocation,
) -> Result<(Screen, SurfaceReady)> {
    let (ready, ready_rx) = SurfaceReady::channel();
    let alerts = AlertPresenter::new(Arc::new(ConsoleAlerts), ready_rx);
    let location: Arc<dyn LocationProvider> = Arc::new(location);

    let manager = MapManager::new(
        mode,
        MapSettings::from(&config.map),
        Arc::new(ConsoleMap),
        location,
        alerts,
        crate::geo::get_geocoder(&config.geocoding.url)?,
        crate::route::get_router(&config.routing.url)?,
    );
    Ok((manager, ready))
}

/// Geocode a place and print its marker
pub async fn locate(id: &str) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config)?;
    let place = store.find(id)?.clone();

    let (manager, _ready) =
        open_screen(&config, MapMode::ShowPlace(place.clone()), StaticLocation::unknown())?;

    match manager.setup_placemark(&place).await {
        Some(annotation) => {
            let kind = annotation.subtitle.as_deref().unwrap_or("-");
            println!("{} [{}]", annotation.title, kind);
            println!("  {}", annotation.coordinate);
            Ok(())
        }
        None => {
            eprintln!(
                "Could not locate '{}': {}",
                place.name,
                place.location.as_deref().unwrap_or("no address")
            );
            std::process::exit(1);
        }
    }
}

/// Print the street address at a coordinate
pub async fn address(args: AddressArgs) -> Result<()> {
    let center = Coordinates::new(args.lat, args.lng);
    center.validate()?;

    let config = Config::load()?;
    let (manager, ready) = open_screen(&config, MapMode::PickAddress, StaticLocation::unknown())?;
    manager.setup().await;
    ready.mark_ready();

    manager.region_did_change(center).await;

    let label = manager.picked_address();
    if label.is_empty() {
        println!("No street address at {}", center);
    } else {
        println!("{}", label);
    }
    Ok(())
}

/// Get driving directions to a place
pub async fn route(args: RouteArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let id = args
        .id
        .ok_or_else(|| Error::Config("A place ID is required".to_string()))?;

    let config = Config::load()?;
    let store = open_store(&config)?;
    let place = store.find(&id)?.clone();

    let format = args.format.unwrap_or_else(|| config.defaults.format.clone());
    let formatter =
        get_formatter(&format).ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let origin = if args.here {
        let location = get_ip_locator()?.locate().await?;
        eprintln!("Using IP location: {}", location.display_name);
        Some(location.coordinates())
    } else if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        let origin = Coordinates::new(lat, lng);
        origin.validate()?;
        Some(origin)
    } else {
        None
    };

    let location = origin.map(StaticLocation::at).unwrap_or_else(StaticLocation::unknown);
    let (manager, ready) = open_screen(&config, MapMode::ShowPlace(place.clone()), location)?;
    manager.setup().await;
    ready.mark_ready();

    let result = manager.get_directions().await;
    manager.flush_alerts().await;

    let routes = match result {
        Ok(RouteOutcome::Drawn(routes)) => routes,
        Ok(RouteOutcome::Superseded) => {
            debug!("Route request was superseded");
            return Ok(());
        }
        Err(e) if e.is_user_facing() => std::process::exit(1),
        Err(e) => return Err(e),
    };

    let origin = origin.ok_or(Error::CurrentLocationUnavailable)?;
    let destination = manager.destination().ok_or(Error::DestinationUnresolved)?;
    let report = RouteReport::new(&place, origin, destination, routes);

    let output = match args.provider.as_deref() {
        Some(provider) if formatter.name() == "url" => {
            UrlFormatter.format_with_provider(&report, &config, Some(provider))?
        }
        _ => formatter.format(&report, &config)?,
    };

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
