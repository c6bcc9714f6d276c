//! JSON output formatter

use crate::candidate::resolver::ResolutionReport;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;

/// JSON formatter - outputs the full report as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON report"
    }

    fn format(&self, report: &ResolutionReport, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::sample_report;

    #[test]
    fn test_json_format() {
        let report = sample_report();
        let output = JsonFormatter.format(&report, &Config::default()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["id"], "report-1");
        assert_eq!(parsed["candidates"][0]["origin"]["kind"], "tapped_poi");
        assert!(parsed.get("query").is_none());
    }

    #[test]
    fn test_json_parses_back() {
        let report = sample_report();
        let output = JsonFormatter.format(&report, &Config::default()).unwrap();

        let back: ResolutionReport = serde_json::from_str(&output).unwrap();
        assert_eq!(back.candidates, report.candidates);
    }
}
