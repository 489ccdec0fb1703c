use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use skycast::geo::{Catalog, OverrideRegistry, RandomSource, SeededRandom, ThreadRandom};
use skycast::{
    BackgroundRequest, BackgroundSelector, ConditionRuleEngine, Coordinates, GeoCityMatcher,
    SkycastConfig, WeatherConditionClassifier, WeatherReading, logging,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skycast",
    version,
    about = "Weather backgrounds and condition alerts"
)]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick the background asset for a place and weather description.
    Background {
        /// City name as reported by the weather service.
        #[arg(long)]
        city: String,

        /// ISO country code, may be empty.
        #[arg(long, default_value = "")]
        country: String,

        /// Free-text weather description, e.g. "light rain".
        #[arg(long)]
        description: String,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// RFC 3339 sunrise time.
        #[arg(long, requires = "sunset")]
        sunrise: Option<DateTime<Utc>>,

        /// RFC 3339 sunset time.
        #[arg(long, requires = "sunrise")]
        sunset: Option<DateTime<Utc>>,

        /// Evaluate at this RFC 3339 instant instead of now.
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Seed for the random tiers, for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evaluate a weather reading into condition cards.
    Alerts {
        /// JSON reading file, or "-" for stdin.
        #[arg(long, default_value = "-")]
        reading: String,

        /// Stamp cards with this RFC 3339 instant instead of now.
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let mut config = SkycastConfig::load_from_path(self.config)?;
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        logging::init(&config.logging)?;
        info!("skycast {} starting", skycast::VERSION);

        match self.command {
            Command::Background {
                city,
                country,
                description,
                lat,
                lon,
                sunrise,
                sunset,
                now,
                seed,
            } => {
                let custom = config.load_catalog()?;
                let catalog = match &custom {
                    Some(catalog) => catalog,
                    None => Catalog::builtin()?,
                };
                let matcher = GeoCityMatcher::new(catalog, OverrideRegistry::with_defaults())?;
                let selector = BackgroundSelector::new(matcher, WeatherConditionClassifier::new())
                    .with_solar_ephemeris(config.background.solar_ephemeris);

                let mut request = BackgroundRequest::new(&city, &country, &description);
                if let Some(coordinates) = Coordinates::from_parts(lat, lon) {
                    request = request.with_coordinates(coordinates);
                }
                if let (Some(sunrise), Some(sunset)) = (sunrise, sunset) {
                    request = request.with_ephemeris(sunrise, sunset);
                }
                if let Some(now) = now {
                    request = request.at(now);
                }

                let mut rng: Box<dyn RandomSource> = match seed {
                    Some(seed) => Box::new(SeededRandom::new(seed)),
                    None => Box::new(ThreadRandom),
                };
                let selection = selector.select(&request, rng.as_mut());
                println!("{}", serde_json::to_string_pretty(&selection)?);
            }
            Command::Alerts { reading, now } => {
                let reading = read_reading(&reading)?;
                let engine = ConditionRuleEngine::new(config.rules);
                let cards = engine.evaluate_at(&reading, now.unwrap_or_else(Utc::now));
                println!("{}", serde_json::to_string_pretty(&cards)?);
            }
        }

        Ok(())
    }
}

fn read_reading(source: &str) -> anyhow::Result<WeatherReading> {
    let contents = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read weather reading from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read weather reading from {source}"))?
    };

    if contents.trim().is_empty() {
        bail!("Weather reading is empty");
    }

    serde_json::from_str(&contents).context("Weather reading is not valid JSON")
}
