use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Debug, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub draft: bool,
    pub pub_date: Option<String>,
    pub updated_date: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Styleguide entries render on their own page but never appear in listings.
    #[serde(default)]
    pub styleguide: bool,
    #[serde(rename = "sourceURL")]
    pub source_url: Option<String>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Articles,
    Notes,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Articles, Collection::Notes];

    /// Directory name under the content root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Collection::Articles => "articles",
            Collection::Notes => "notes",
        }
    }

    /// Path segment pages of this collection are published under.
    pub fn route(self) -> &'static str {
        match self {
            Collection::Articles => "writing",
            Collection::Notes => "notes",
        }
    }
}

/// A loaded content document.
#[derive(Debug, Clone)]
pub struct ContentEntry {
    /// Path of the source file relative to its collection directory.
    pub id: String,
    pub collection: Collection,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    /// Markdown source after the frontmatter block.
    pub body: String,
    pub frontmatter: Frontmatter,
}

impl ContentEntry {
    /// Entry with just the fields the summary extractor looks at.
    pub fn new(title: &str, description: Option<&str>, body: &str) -> Self {
        Self {
            id: String::new(),
            collection: Collection::Articles,
            slug: String::new(),
            title: title.to_string(),
            description: description.map(str::to_string),
            body: body.to_string(),
            frontmatter: Frontmatter::default(),
        }
    }
}

/// Values computed by the document transforms, exposed next to the
/// author-written frontmatter.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMeta {
    pub minutes_read: Option<String>,
    pub has_footnotes: Option<bool>,
}

#[derive(Debug, Serialize, Clone)]
pub struct Page {
    pub title: String,
    pub collection: Collection,
    pub summary: String,
    pub pub_date: Option<String>,
    pub minutes_read: Option<String>,
    /// Output path relative to the output directory.
    pub path: PathBuf,
}
