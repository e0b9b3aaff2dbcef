//! Site configuration, read from an optional `site.yaml`.
//!
//! ```yaml
//! site:
//!   name: "Example"
//!   url: "https://example.com/"
//! author:
//!   given_name: "Ada"
//!   family_name: "Lovelace"
//! reading:
//!   words_per_minute: 200
//! lists:
//!   threshold: 120
//! summary:
//!   max_length: 200
//! ```
//!
//! The raw file is resolved once at start-up by [`SiteConfig::resolve`] and
//! the result is passed by reference from then on.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::plugins::{DEFAULT_LIST_THRESHOLD, DEFAULT_WORDS_PER_MINUTE};
use crate::summary::DEFAULT_SUMMARY_LENGTH;

/// `site.yaml` as written by the author.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSiteConfig {
    #[serde(default)]
    pub site: RawSite,
    #[serde(default)]
    pub author: RawAuthor,
    #[serde(default)]
    pub reading: ReadingConfig,
    #[serde(default)]
    pub lists: ListsConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSite {
    #[serde(default = "default_site_name")]
    pub name: String,
    #[serde(default = "default_site_url")]
    pub url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for RawSite {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            url: default_site_url(),
            locale: default_locale(),
        }
    }
}

fn default_site_name() -> String {
    "Untitled".to_string()
}

fn default_site_url() -> String {
    "/".to_string()
}

fn default_locale() -> String {
    "en_GB".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

fn default_words_per_minute() -> u32 {
    DEFAULT_WORDS_PER_MINUTE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsConfig {
    #[serde(default = "default_list_threshold")]
    pub threshold: f64,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_LIST_THRESHOLD,
        }
    }
}

fn default_list_threshold() -> f64 {
    DEFAULT_LIST_THRESHOLD
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_summary_length")]
    pub max_length: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_SUMMARY_LENGTH,
        }
    }
}

fn default_summary_length() -> usize {
    DEFAULT_SUMMARY_LENGTH
}

/// Resolved configuration: the raw values plus fields derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct SiteConfig {
    pub site: Site,
    pub author: Author,
    pub reading: ReadingConfig,
    pub lists: ListsConfig,
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub name: String,
    /// Base URL without a trailing slash, empty for a root-relative site.
    pub url: String,
    pub locale: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub given_name: String,
    pub family_name: String,
    pub full_name: String,
    pub email: Option<String>,
}

impl SiteConfig {
    pub fn resolve(raw: RawSiteConfig) -> Self {
        let full_name = [raw.author.given_name.as_str(), raw.author.family_name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        SiteConfig {
            site: Site {
                name: raw.site.name,
                url: raw.site.url.trim_end_matches('/').to_string(),
                locale: raw.site.locale,
            },
            author: Author {
                given_name: raw.author.given_name,
                family_name: raw.author.family_name,
                full_name,
                email: raw.author.email,
            },
            reading: raw.reading,
            lists: raw.lists,
            summary: raw.summary,
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: RawSiteConfig = serde_yaml::from_str(yaml)?;
        Ok(Self::resolve(raw))
    }

    /// Loads `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("Loading site config: {}", path.display());
                Self::from_yaml(&fs::read_to_string(path)?)
            }
            None => Ok(Self::default()),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::resolve(RawSiteConfig::default())
    }
}
