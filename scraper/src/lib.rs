pub mod config;
pub mod fetch;
pub mod scraper;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::config::ScrapeConfig;
pub use crate::fetch::{FetchError, HttpFetcher, PageFetcher};
pub use crate::scraper::{
    extract_description, extract_image, find_episode_links, is_floated_style, resolve_url,
    save_episodes, scrape_data, scrape_season, Episode, EpisodeLink, ScrapeError,
};
