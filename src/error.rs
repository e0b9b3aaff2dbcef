//! Error types for site builds.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a build.
///
/// The content transforms themselves never fail; these cover loading,
/// configuration, templating and writing output.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid site config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Frontmatter error in {}: {message}", path.display())]
    Frontmatter { path: PathBuf, message: String },

    #[error("Entry {} has no title", path.display())]
    MissingTitle { path: PathBuf },

    #[error("Entry {} has an invalid slug {slug:?}", path.display())]
    InvalidSlug { path: PathBuf, slug: String },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
