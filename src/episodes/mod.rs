pub mod table;

use crate::error::{AppError, AppResult};
use crate::utils::Reporter;
use std::path::{Path, PathBuf};
use table::parse_episode_titles;
use url::Url;

/// The only host pages are fetched from
pub const TRUSTED_HOST: &str = "en.wikipedia.org";

const USER_AGENT: &str = concat!("mkvflags/", env!("CARGO_PKG_VERSION"));

/// Where the episode list page comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlSource {
    /// A saved copy of the page
    File(PathBuf),
    Url(Url),
}

impl HtmlSource {
    /// Accept a URL only when it is http(s) on the trusted host
    pub fn trusted_url(raw: &str) -> AppResult<Self> {
        let url = Url::parse(raw)
            .map_err(|e| AppError::Scrape(format!("invalid URL {:?}: {}", raw, e)))?;
        check_trusted(&url)?;
        Ok(HtmlSource::Url(url))
    }
}

fn check_trusted(url: &Url) -> AppResult {
    if !matches!(url.scheme(), "http" | "https") || url.host_str() != Some(TRUSTED_HOST) {
        return Err(AppError::Scrape(format!(
            "{} is not a page on {}",
            url, TRUSTED_HOST
        )));
    }
    Ok(())
}

/// Builds a names list for the renamer from an episode table
pub struct EpisodeScraper<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> EpisodeScraper<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self { reporter }
    }

    /// Episode titles listed under the first heading containing `heading`
    pub fn scrape(&self, source: &HtmlSource, heading: &str) -> AppResult<Vec<String>> {
        let html = match source {
            HtmlSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                AppError::Scrape(format!("cannot read {}: {}", path.display(), e))
            })?,
            HtmlSource::Url(url) => fetch(url)?,
        };
        let titles = parse_episode_titles(&html, heading)?;
        self.reporter.info(&format!(
            "Found {} episode title(s) under {:?}",
            titles.len(),
            heading
        ));
        Ok(titles)
    }

    /// Write one title per line, to `output` or stdout
    pub fn write_names(&self, titles: &[String], output: Option<&Path>) -> AppResult {
        let contents = names_file_contents(titles);
        match output {
            Some(path) => {
                std::fs::write(path, contents)?;
                self.reporter
                    .info(&format!("Wrote episode names to {}", path.display()));
            }
            None => print!("{}", contents),
        }
        Ok(())
    }
}

/// Newline-delimited list in the format the renamer reads
pub fn names_file_contents(titles: &[String]) -> String {
    let mut contents = titles.join("\n");
    contents.push('\n');
    contents
}

fn fetch(url: &Url) -> AppResult<String> {
    tracing::debug!("GET {}", url);
    let response = ureq::get(url.as_str())
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                AppError::Scrape(format!("GET {} returned status {}", url, code))
            }
            other => AppError::Scrape(format!("GET {} failed: {}", url, other)),
        })?;

    // Redirects must not leave the trusted host either
    let landed = Url::parse(response.get_url())
        .map_err(|e| AppError::Scrape(format!("invalid redirect target: {}", e)))?;
    check_trusted(&landed)?;

    response
        .into_string()
        .map_err(|e| AppError::Scrape(format!("cannot read response from {}: {}", url, e)))
}
