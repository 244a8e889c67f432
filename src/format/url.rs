//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, RouteReport};

/// URL formatter - outputs a map URL of the destination
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        report: &RouteReport,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        config.format_url(provider, report.destination.lat, report.destination.lng)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL of the destination"
    }

    fn format(&self, report: &RouteReport, config: &Config) -> Result<String> {
        self.format_with_provider(report, config, None)
    }
}
