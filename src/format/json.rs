//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, RouteReport};

/// JSON formatter - outputs the full report as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON report"
    }

    fn format(&self, report: &RouteReport, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::sample_report;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter
            .format(&sample_report(), &Config::default())
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["place_name"], "Pushkin Cafe");
        assert_eq!(parsed["place_type"], "Cafe");
        assert_eq!(parsed["routes"][0]["polyline"]["points"].as_array().unwrap().len(), 3);
    }
}
