//! GPX output formatter

use crate::candidate::resolver::ResolutionReport;
use crate::candidate::CandidateOrigin;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;

/// GPX formatter - outputs one waypoint per candidate
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, report: &ResolutionReport, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="place-resolver">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>place-resolver {}</name>\n", report.id));
        gpx.push_str(&format!("    <time>{}</time>\n", report.generated_at));
        gpx.push_str("  </metadata>\n");

        for candidate in &report.candidates {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                candidate.coordinate.latitude, candidate.coordinate.longitude
            ));
            gpx.push('\n');
            gpx.push_str(&format!(
                "    <name>{}</name>\n",
                escape_xml(candidate.display_name())
            ));

            if let Some(address) = &candidate.address {
                gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(address)));
            }

            let symbol = match candidate.origin {
                CandidateOrigin::Saved { .. } => "Flag",
                CandidateOrigin::TappedPoi { .. } => "Pin",
                CandidateOrigin::SearchPoi { .. } => "Waypoint",
            };
            gpx.push_str(&format!("    <sym>{}</sym>\n", symbol));
            gpx.push_str(&format!("    <type>{}</type>\n", candidate.origin.label()));

            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::sample_report;

    #[test]
    fn test_gpx_format() {
        let report = sample_report();
        let output = GpxFormatter.format(&report, &Config::default()).unwrap();

        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1""#));
        assert_eq!(output.matches("<wpt").count(), report.candidates.len());
        assert!(output.contains("<name>Corner Cafe</name>"));
        assert!(output.contains("<desc>1 Main St</desc>"));
        assert!(output.contains("<sym>Flag</sym>"));
        assert!(output.contains("</gpx>"));
    }

    #[test]
    fn test_gpx_escapes_names() {
        let mut report = sample_report();
        report.candidates[0].name = "Fish & Chips <Deli>".to_string();

        let output = GpxFormatter.format(&report, &Config::default()).unwrap();
        assert!(output.contains("<name>Fish &amp; Chips &lt;Deli&gt;</name>"));
    }

    #[test]
    fn test_gpx_formatter_info() {
        assert_eq!(GpxFormatter.name(), "gpx");
        assert!(!GpxFormatter.description().is_empty());
    }
}
