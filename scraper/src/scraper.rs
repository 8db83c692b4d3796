use anyhow::{Context, Result};
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::thread;
use thiserror::Error;

use crate::config::{ScrapeConfig, CONTAINER_ID, EPISODE_PATH_MARKER};
use crate::fetch::{HttpFetcher, PageFetcher};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no element with id \"{0}\" on the listing page")]
    ContainerNotFound(String),
}

/// One entry of the output file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Episode {
    #[serde(rename = "titre")]
    pub title: String,
    pub image: Option<String>,
    pub description: String,
}

/// An episode heading found on the listing page. Borrows the heading so the
/// description can be read from its siblings later.
#[derive(Debug, Clone)]
pub struct EpisodeLink<'a> {
    pub title: String,
    pub detail_url: String,
    pub heading: ElementRef<'a>,
}

/// Trimmed text content of an element, descendants included.
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Makes a listing href absolute. Hrefs that already carry a scheme are
/// kept as they are.
pub fn resolve_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}

pub fn find_episode_links<'a>(document: &'a Html, base_url: &str) -> Result<Vec<EpisodeLink<'a>>> {
    let container_selector = Selector::parse(&format!("#{}", CONTAINER_ID)).unwrap();
    let heading_selector = Selector::parse("h2").unwrap();
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| ScrapeError::ContainerNotFound(CONTAINER_ID.to_string()))?;

    let mut links = Vec::new();

    for heading in container.select(&heading_selector) {
        let Some(anchor) = heading.select(&anchor_selector).next() else {
            debug!("skipping heading without link: {}", element_text(heading));
            continue;
        };

        // a[href] guarantees the attribute
        let href = anchor.value().attr("href").unwrap_or_default();
        if !href.contains(EPISODE_PATH_MARKER) {
            debug!("skipping non-episode link {}", href);
            continue;
        }

        links.push(EpisodeLink {
            title: element_text(anchor),
            detail_url: resolve_url(base_url, href),
            heading,
        });
    }

    Ok(links)
}

/// Collects the text sitting between a heading and the next heading of the
/// same level: paragraphs and bare text nodes, joined by single spaces.
pub fn extract_description(heading: ElementRef) -> String {
    let level = heading.value().name();
    let mut fragments: Vec<String> = Vec::new();

    for sibling in heading.next_siblings() {
        if let Some(element) = sibling.value().as_element() {
            if element.name() == level {
                break;
            }
            if element.name() == "p" {
                if let Some(paragraph) = ElementRef::wrap(sibling) {
                    fragments.push(element_text(paragraph));
                }
            }
        } else if let Some(text) = sibling.value().as_text() {
            let text = text.trim();
            if !text.is_empty() {
                fragments.push(text.to_string());
            }
        }
    }

    fragments.join(" ").trim().to_string()
}

/// Detail pages float the episode still next to the synopsis; banners and
/// icons are never floated.
pub fn is_floated_style(style: &str) -> bool {
    style.contains("float")
}

/// Picks the episode image of a detail page: the first floated `<img>`, or
/// failing that the first `<img>` at all.
pub fn extract_image(document: &Html) -> Option<String> {
    let img_selector = Selector::parse("img").unwrap();

    let image = document
        .select(&img_selector)
        .find(|img| img.value().attr("style").is_some_and(is_floated_style))
        .or_else(|| document.select(&img_selector).next())?;

    image.value().attr("src").map(|src| src.to_string())
}

fn fetch_episode_image(fetcher: &dyn PageFetcher, url: &str) -> Result<Option<String>> {
    let html = fetcher
        .fetch_html(url)
        .with_context(|| format!("Failed to fetch episode page {}", url))?;
    let document = Html::parse_document(&html);
    Ok(extract_image(&document))
}

/// Runs the whole pipeline for one season and returns the episodes in
/// listing order. Nothing is written.
pub fn scrape_season(fetcher: &dyn PageFetcher, config: &ScrapeConfig) -> Result<Vec<Episode>> {
    let season_url = config.season_url();
    info!("fetching listing {}", season_url);

    let html = fetcher
        .fetch_html(&season_url)
        .with_context(|| format!("Failed to fetch season listing {}", season_url))?;
    let document = Html::parse_document(&html);
    let links = find_episode_links(&document, &config.base_url)?;

    println!(
        "→ {} liens d’épisodes trouvés pour la saison {}",
        links.len(),
        config.season
    );

    let mut episodes = Vec::with_capacity(links.len());

    for (index, link) in links.iter().enumerate() {
        println!("   • {}", link.title);

        let description = extract_description(link.heading);
        let image = match fetch_episode_image(fetcher, &link.detail_url) {
            Ok(image) => image,
            Err(e) if !config.strict => {
                warn!("{:#}, recording \"{}\" without image", e, link.title);
                None
            }
            Err(e) => return Err(e),
        };

        if image.is_none() {
            debug!("no image for {}", link.detail_url);
        }

        episodes.push(Episode {
            title: link.title.clone(),
            image,
            description,
        });

        if index + 1 < links.len() && !config.delay.is_zero() {
            thread::sleep(config.delay);
        }
    }

    Ok(episodes)
}

/// Writes the episodes as pretty JSON to `<output_dir>/saison<season>.json`,
/// creating the directory if needed.
pub fn save_episodes(episodes: &[Episode], config: &ScrapeConfig) -> Result<PathBuf> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let output_file = config.output_file();

    let json = serde_json::to_string_pretty(episodes).context("Failed to serialize episodes")?;

    fs::write(&output_file, json)
        .with_context(|| format!("Failed to write {}", output_file.display()))?;

    Ok(output_file)
}

pub fn scrape_data(config: &ScrapeConfig) -> Result<PathBuf> {
    let fetcher = HttpFetcher::new(config.timeout).context("Failed to build HTTP client")?;

    let episodes = scrape_season(&fetcher, config)?;
    let output_file = save_episodes(&episodes, config)?;

    println!(
        "✅ {} épisodes sauvegardés dans {}",
        episodes.len(),
        output_file.display()
    );

    Ok(output_file)
}
