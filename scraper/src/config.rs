use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL: &str = "https://www.simpsonspark.com";

/// Path segment every episode detail link carries. Headings linking
/// anywhere else are not episodes.
pub const EPISODE_PATH_MARKER: &str = "/episodes/";

/// Id of the element wrapping the episode headings on a listing page.
pub const CONTAINER_ID: &str = "centre";

pub const SEASON_PROMPT: &str = "Numéro de la saison à scraper (ex: 1)";

pub const DEFAULT_OUTPUT_DIR: &str = "scrap";
pub const DEFAULT_DELAY_MS: u64 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything one run needs to know, built once at process start.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeConfig {
    pub season: String,
    pub base_url: String,
    pub output_dir: PathBuf,
    /// Pause between two consecutive detail-page fetches
    pub delay: Duration,
    pub timeout: Duration,
    /// Abort the run when a detail page cannot be fetched instead of
    /// recording the episode without an image
    pub strict: bool,
}

impl ScrapeConfig {
    pub fn new(season: &str) -> Self {
        Self {
            season: season.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn season_url(&self) -> String {
        format!(
            "{}/episodes-de-la-saison-{}",
            self.base_url.trim_end_matches('/'),
            self.season
        )
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(format!("saison{}.json", self.season))
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            season: String::new(),
            base_url: BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            strict: false,
        }
    }
}

/// Reads the season number from the first line of `input`, trimmed.
pub fn read_season_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read season number")?;
    Ok(line.trim().to_string())
}
