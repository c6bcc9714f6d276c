//! URL output formatter

use crate::candidate::resolver::ResolutionReport;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::OutputFormatter;

/// URL formatter - outputs a map URL for the top-ranked candidate
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        report: &ResolutionReport,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let top = report
            .candidates
            .first()
            .ok_or_else(|| Error::Config("No candidate to link to".to_string()))?;

        config.format_url(provider, top.coordinate.latitude, top.coordinate.longitude)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for the nearest candidate"
    }

    fn format(&self, report: &ResolutionReport, config: &Config) -> Result<String> {
        self.format_with_provider(report, config, None)
    }
}
