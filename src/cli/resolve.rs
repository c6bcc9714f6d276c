//! Resolve command handler
//!
//! Ranks candidate places for a viewport using saved places and, unless
//! running offline, the configured search provider.

use crate::candidate::resolver::{ResolutionReport, Resolver};
use crate::candidate::PendingTap;
use crate::config::Config;
use crate::coord::{Coordinate, Viewport};
use crate::error::{Error, Result};
use crate::format::url::UrlFormatter;
use crate::format::{available_formats, get_formatter};
use crate::geo::{get_provider, NoSearch, SearchProvider};
use crate::places::{PlaceStore, SavedPlaceStore};
use clap::Args;

/// Resolve command arguments
#[derive(Args)]
pub struct ResolveArgs {
    /// Viewport center latitude
    #[arg(long, allow_hyphen_values = true, required_unless_present = "list_formats")]
    pub lat: Option<f64>,

    /// Viewport center longitude
    #[arg(long, allow_hyphen_values = true, required_unless_present = "list_formats")]
    pub lng: Option<f64>,

    /// Viewport span in degrees (both axes)
    #[arg(long, short = 's')]
    pub span: Option<f64>,

    /// Search text; omit to browse nearby
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Latitude of a pending map tap
    #[arg(long, allow_hyphen_values = true, requires = "tap_lng")]
    pub tap_lat: Option<f64>,

    /// Longitude of a pending map tap
    #[arg(long, allow_hyphen_values = true, requires = "tap_lat")]
    pub tap_lng: Option<f64>,

    /// Name of the tapped point of interest
    #[arg(long, requires = "tap_lat")]
    pub tap_name: Option<String>,

    /// Provider id of the tapped point of interest
    #[arg(long, requires = "tap_lat")]
    pub tap_id: Option<String>,

    /// Skip the search provider and rank saved places only
    #[arg(long)]
    pub offline: bool,

    /// Maximum number of search results
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Map provider for the url format
    #[arg(long)]
    pub provider: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl ResolveArgs {
    fn viewport(&self, config: &Config) -> Result<Viewport> {
        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Err(Error::InvalidCoordinates(
                "Both --lat and --lng are required".to_string(),
            ));
        };
        let span = self.span.unwrap_or(config.search.default_span);
        let viewport = Viewport::square(Coordinate::new(lat, lng), span);
        viewport.validate()?;
        Ok(viewport)
    }

    fn tap(&self) -> Result<Option<PendingTap>> {
        let (Some(lat), Some(lng)) = (self.tap_lat, self.tap_lng) else {
            return Ok(None);
        };
        let coordinate = Coordinate::new(lat, lng);
        coordinate.validate()?;

        let mut tap = PendingTap::new(coordinate);
        tap.place_id = self.tap_id.clone();
        tap.name = self.tap_name.clone();
        Ok(Some(tap))
    }
}

/// Run the resolve command
pub async fn run(args: ResolveArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;
    let viewport = args.viewport(&config)?;
    let tap = args.tap()?;
    let format = args.format.clone().unwrap_or(config.output.format.clone());

    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let store = PlaceStore::load(&config.places)?;

    let report = if args.offline {
        run_pass(&NoSearch, &store, &config, &args, &viewport, tap.as_ref()).await?
    } else {
        let provider = get_provider(&config.geocode)?;
        run_pass(&provider, &store, &config, &args, &viewport, tap.as_ref()).await?
    };

    if report.search_degraded {
        eprintln!("Search unavailable, showing saved places only");
    }

    let output = match (&args.provider, format.to_lowercase().as_str()) {
        (Some(provider), "url") => {
            UrlFormatter.format_with_provider(&report, &config, Some(provider.as_str()))?
        }
        _ => formatter.format(&report, &config)?,
    };

    // Write output
    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

async fn run_pass<S, P>(
    search: &S,
    places: &P,
    config: &Config,
    args: &ResolveArgs,
    viewport: &Viewport,
    tap: Option<&PendingTap>,
) -> Result<ResolutionReport>
where
    S: SearchProvider,
    P: SavedPlaceStore,
{
    Resolver::new(search, places)
        .with_radius_policy(config.search.radius_policy())
        .with_limit(args.limit.unwrap_or(config.search.limit))
        .resolve(viewport, args.query.as_deref(), tap)
        .await
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
