use std::fs;
use std::path::{Path, PathBuf};

const FIXTURES_DIR: &str = "src/tests/fixtures";

fn fixture_path(subdir: Option<&str>, name: &str) -> PathBuf {
    let dir = Path::new(FIXTURES_DIR);
    let dir = match subdir {
        Some(subdir) => dir.join(subdir),
        None => dir.to_path_buf(),
    };
    dir.join(format!("{}.html", name))
}

/// Load test HTML fixture by name
pub fn load_html_fixture(fixture_name: &str) -> String {
    fs::read_to_string(fixture_path(None, fixture_name))
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a saved page that once broke the scraper
pub fn load_failure_html(failure_name: &str) -> Option<String> {
    fs::read_to_string(fixture_path(Some("failures"), failure_name)).ok()
}
