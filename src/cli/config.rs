//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "map.region_meters")
    pub key: Option<String>,

    /// Value to set; an empty string clears optional keys
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// List settable keys
    #[arg(long, conflicts_with_all = ["key", "value"])]
    pub keys: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.keys {
        for key in Config::available_keys() {
            println!("{}", key);
        }
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (args.key, args.value) {
        (None, _) => show_all_config(&config),

        (Some(key), None) => match config.get(&key) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("Unknown config key: {}", key);
                eprintln!("Run `my-places config --keys` for the list of keys");
                std::process::exit(1);
            }
        },

        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[defaults]");
    println!("format = \"{}\"", config.defaults.format);
    println!();

    println!("[map]");
    println!("region_meters = {}", config.map.region_meters);
    println!("recentre_threshold_meters = {}", config.map.recentre_threshold_meters);
    println!("recentre_delay_secs = {}", config.map.recentre_delay_secs);
    println!();

    println!("[geocoding]");
    println!("url = \"{}\"", config.geocoding.url);
    println!();

    println!("[routing]");
    println!("url = \"{}\"", config.routing.url);
    println!();

    println!("[storage]");
    match &config.storage.places_file {
        Some(path) => println!("places_file = \"{}\"", path.display()),
        None => println!("places_file = \"\" # default data directory"),
    }
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        println!("{} = \"{}\"", name, template);
    }
}
