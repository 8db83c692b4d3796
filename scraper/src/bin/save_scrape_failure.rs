use anyhow::{Context, Result};
use scraper::{Html, Selector};
use season_scraper::config::{BASE_URL, CONTAINER_ID, DEFAULT_TIMEOUT_SECS};
use season_scraper::{extract_image, find_episode_links, HttpFetcher, PageFetcher};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Get URL from command line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide a URL and a test name");
        eprintln!("Usage: cargo run --bin save_scrape_failure <URL> <test_name>");
        std::process::exit(1);
    }

    let url = &args[1];
    let test_name = &args[2];

    println!("Fetching HTML from {}...", url);

    let fetcher = HttpFetcher::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;
    let html = fetcher.fetch_html(url)?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    // Save the HTML for testing
    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    let document = Html::parse_document(&html);
    let container_selector = Selector::parse(&format!("#{}", CONTAINER_ID)).unwrap();
    let heading_selector = Selector::parse("h2").unwrap();
    let img_selector = Selector::parse("img").unwrap();

    let container = document.select(&container_selector).next();
    let heading_count = container.map_or(0, |c| c.select(&heading_selector).count());
    let image_count = document.select(&img_selector).count();

    println!("HTML analysis results:");
    println!("  - Has #{} container: {}", CONTAINER_ID, container.is_some());
    println!("  - h2 headings in container: {}", heading_count);
    println!("  - img elements: {}", image_count);
    println!("  - Chosen episode image: {:?}", extract_image(&document));

    // Now try to parse it as a listing page
    match find_episode_links(&document, BASE_URL) {
        Ok(links) if links.is_empty() => {
            println!("⚠️ Parsed as a listing but no episode links were found.");
        }
        Ok(links) => {
            println!("Parsed {} episode links:", links.len());
            for link in links {
                println!("  {} -> {}", link.title, link.detail_url);
            }
        }
        Err(e) => {
            println!("✅ Listing parse failed with error: {}", e);
        }
    }

    println!("\nThis page has been saved and will be included in regression tests.");

    Ok(())
}
