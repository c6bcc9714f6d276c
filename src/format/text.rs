//! Human-readable text output formatter

use crate::candidate::resolver::ResolutionReport;
use crate::config::Config;
use crate::error::Result;
use crate::format::{format_distance, OutputFormatter};

/// Text formatter - outputs a numbered candidate list
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &ResolutionReport, _config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("place-resolver ({})\n", report.id));
        output.push_str(&format!("Center: {}\n", report.viewport.center));
        output.push_str(&format!("Radius: {:.0}m\n", report.radius_meters));
        if let Some(query) = &report.query {
            output.push_str(&format!("Query: {}\n", query));
        }
        if report.search_degraded {
            output.push_str("Search unavailable, showing saved places only\n");
        }
        output.push('\n');

        if report.candidates.is_empty() {
            output.push_str("No candidates\n");
            return Ok(output);
        }

        output.push_str("Candidates:\n");
        for (i, candidate) in report.candidates.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. [{}] {} ({})",
                i + 1,
                candidate.origin.label(),
                candidate.display_name(),
                format_distance(candidate.distance_meters),
            ));
            if let Some(count) = candidate.saved_entry_count() {
                output.push_str(&format!(" x{}", count));
            }
            output.push('\n');

            let detail = candidate
                .address
                .as_deref()
                .or(candidate.category())
                .or(candidate.city.as_deref());
            if let Some(detail) = detail {
                output.push_str(&format!("      {}\n", detail));
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::{empty_report, sample_report};

    #[test]
    fn test_text_format() {
        let output = TextFormatter
            .format(&sample_report(), &Config::default())
            .unwrap();

        assert!(output.contains("place-resolver (report-1)"));
        assert!(output.contains("Center: (40.712800, -74.006000)"));
        assert!(output.contains("Candidates:"));
        assert!(output.contains("1. [tap] Corner Cafe (0 m)"));
        assert!(output.contains("[saved] Home"));
        assert!(output.contains("x3"));
        assert!(output.contains("1 Main St"));
        assert!(output.contains("park"));
    }

    #[test]
    fn test_text_format_degraded_and_empty() {
        let mut report = empty_report();
        report.search_degraded = true;
        report.query = Some("pizza".to_string());

        let output = TextFormatter.format(&report, &Config::default()).unwrap();
        assert!(output.contains("Query: pizza"));
        assert!(output.contains("Search unavailable"));
        assert!(output.contains("No candidates"));
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}
