//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, RouteReport};

/// GPX formatter - one track per route plus start and destination waypoints
pub struct GpxFormatter;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX track file"
    }

    fn format(&self, report: &RouteReport, _config: &Config) -> Result<String> {
        let name = escape(&report.place_name);
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="my-places">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>Route to {}</name>\n", name));
        gpx.push_str(&format!("    <time>{}</time>\n", report.generated_at.to_rfc3339()));
        gpx.push_str("  </metadata>\n");

        gpx.push_str(&format!(
            "  <wpt lat=\"{}\" lon=\"{}\">\n    <name>Start</name>\n  </wpt>\n",
            report.origin.lat, report.origin.lng
        ));
        gpx.push_str(&format!(
            "  <wpt lat=\"{}\" lon=\"{}\">\n    <name>{}</name>\n",
            report.destination.lat, report.destination.lng, name
        ));
        if let Some(kind) = &report.place_type {
            gpx.push_str(&format!("    <type>{}</type>\n", escape(kind)));
        }
        gpx.push_str("  </wpt>\n");

        for route in &report.routes {
            gpx.push_str("  <trk>\n");
            gpx.push_str(&format!("    <name>{}</name>\n", name));
            gpx.push_str(&format!("    <desc>{}</desc>\n", route.summary()));
            gpx.push_str("    <trkseg>\n");
            for point in &route.polyline.points {
                gpx.push_str(&format!(
                    "      <trkpt lat=\"{}\" lon=\"{}\"/>\n",
                    point.lat, point.lng
                ));
            }
            gpx.push_str("    </trkseg>\n");
            gpx.push_str("  </trk>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
