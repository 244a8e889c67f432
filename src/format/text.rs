//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, RouteReport};

/// Text formatter - outputs a short summary per route
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &RouteReport, _config: &Config) -> Result<String> {
        let mut output = String::new();

        match &report.place_type {
            Some(kind) => output.push_str(&format!("Route to {} ({})\n", report.place_name, kind)),
            None => output.push_str(&format!("Route to {}\n", report.place_name)),
        }
        output.push_str(&format!("From: {}\n", report.origin));
        output.push_str(&format!("To:   {}\n", report.destination));

        for summary in report.summaries() {
            output.push_str(&format!("  {}\n", summary));
        }

        Ok(output)
    }
}
