use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use dialoguer::Input;
use season_scraper::config::{
    read_season_line, BASE_URL, DEFAULT_DELAY_MS, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS,
    SEASON_PROMPT,
};
use season_scraper::{scrape_data, ScrapeConfig};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

/// Scrape the episodes of one season into <output-dir>/saison<SEASON>.json
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Season number; asked for interactively when omitted
    season: Option<String>,

    /// Directory receiving the JSON file
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Pause between two episode page requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Timeout applied to every HTTP request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, default_value = BASE_URL)]
    base_url: String,

    /// Fail the run when an episode page cannot be fetched
    #[arg(long)]
    strict: bool,
}

fn prompt_season() -> Result<String> {
    if Term::stderr().is_term() && io::stdin().is_terminal() {
        return Input::<String>::new()
            .with_prompt(SEASON_PROMPT)
            .interact_text()
            .context("Failed to read season number");
    }

    // dialoguer refuses to prompt without a terminal; a season piped on
    // stdin (`echo 3 | season_scraper`) is read as a plain line instead.
    eprint!("{} : ", SEASON_PROMPT);
    read_season_line(&mut io::stdin().lock())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let season = match cli.season {
        Some(season) => season,
        None => prompt_season()?,
    };

    let season = season.trim();
    if season.is_empty() {
        eprintln!("Please provide a season number");
        std::process::exit(1);
    }

    let config = ScrapeConfig {
        output_dir: cli.output_dir,
        delay: Duration::from_millis(cli.delay_ms),
        timeout: Duration::from_secs(cli.timeout_secs),
        base_url: cli.base_url,
        strict: cli.strict,
        ..ScrapeConfig::new(season)
    };

    scrape_data(&config)?;

    Ok(())
}
