use comrak::ComrakOptions;
use gray_matter::engine::YAML;
use gray_matter::Matter;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::domain::{Collection, ContentEntry, DerivedMeta, Frontmatter};
use crate::error::{Error, Result};
use crate::markdown::parse_markdown;
use crate::plugins::Pipeline;
use crate::summary::generate_summary;

/// An entry after it has been through the transform pipeline.
#[derive(Debug, Clone)]
pub struct RenderedEntry {
    pub html: String,
    pub meta: DerivedMeta,
    pub summary: String,
}

pub fn is_markdown_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("md") | Some("mdx")
    )
}

/// Markdown and MDX files are entries unless their name starts with `_`.
pub fn is_entry_file(path: &Path) -> bool {
    let is_hidden = path
        .file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.starts_with('_'));
    is_markdown_file(path) && !is_hidden
}

/// Loads every entry of `collection` under `content_dir`, in path order.
/// A missing collection directory yields no entries.
pub fn load_collection(content_dir: &Path, collection: Collection) -> Result<Vec<ContentEntry>> {
    let collection_dir = content_dir.join(collection.dir_name());
    if !collection_dir.is_dir() {
        log::debug!("No {} directory at {}", collection.dir_name(), collection_dir.display());
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for dir_entry in WalkDir::new(&collection_dir).sort_by_file_name() {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if dir_entry.file_type().is_file() && is_entry_file(path) {
            entries.push(load_entry(path, &collection_dir, collection)?);
        }
    }
    Ok(entries)
}

pub fn load_entry(path: &Path, collection_dir: &Path, collection: Collection) -> Result<ContentEntry> {
    log::debug!("Loading entry: {}", path.display());
    let source = fs::read_to_string(path)?;
    let relative = path.strip_prefix(collection_dir).unwrap_or(path);
    let id = relative.to_string_lossy().replace('\\', "/");
    parse_entry(&source, &id, collection).map_err(|e| match e {
        Error::Frontmatter { message, .. } => Error::Frontmatter {
            path: path.to_path_buf(),
            message,
        },
        Error::MissingTitle { .. } => Error::MissingTitle {
            path: path.to_path_buf(),
        },
        Error::InvalidSlug { slug, .. } => Error::InvalidSlug {
            path: path.to_path_buf(),
            slug,
        },
        other => other,
    })
}

/// Splits `source` into frontmatter and body and builds the entry.
/// `id` is the collection-relative path, used for the default slug.
pub fn parse_entry(source: &str, id: &str, collection: Collection) -> Result<ContentEntry> {
    let matter = Matter::<YAML>::new();
    let result = matter.parse(source);

    let frontmatter = match result.data {
        Some(data) => data.deserialize::<Frontmatter>().map_err(|e| Error::Frontmatter {
            path: id.into(),
            message: e.to_string(),
        })?,
        None => Frontmatter::default(),
    };

    let title = frontmatter
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::MissingTitle { path: id.into() })?;
    let slug = match frontmatter.slug.as_deref().map(str::trim) {
        Some(slug) if is_valid_slug(slug) => slug.to_string(),
        Some(slug) => {
            return Err(Error::InvalidSlug {
                path: id.into(),
                slug: slug.to_string(),
            });
        }
        None => default_slug(id),
    };

    Ok(ContentEntry {
        id: id.to_string(),
        collection,
        slug,
        title,
        description: frontmatter.description.clone(),
        body: result.content,
        frontmatter,
    })
}

/// A frontmatter slug names a single file next to its collection's pages.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
        && !slug.chars().any(char::is_control)
}

fn default_slug(id: &str) -> String {
    let without_ext = match id.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => id,
    };
    without_ext.to_lowercase().replace(' ', "-")
}

/// Entries that get their own page. Drafts are dropped in production.
pub fn filter_for_page(entries: &[ContentEntry], production: bool) -> Vec<&ContentEntry> {
    entries
        .iter()
        .filter(|e| !production || !e.frontmatter.draft)
        .collect()
}

/// Entries that appear in listings. Styleguide entries never do.
pub fn filter_for_listing(entries: &[ContentEntry], production: bool) -> Vec<&ContentEntry> {
    entries
        .iter()
        .filter(|e| (!production || !e.frontmatter.draft) && !e.frontmatter.styleguide)
        .collect()
}

/// Parses the body, runs the transforms and renders HTML.
pub fn render_entry(
    entry: &ContentEntry,
    config: &SiteConfig,
    pipeline: &Pipeline,
    comrak_options: &ComrakOptions,
) -> RenderedEntry {
    let mut doc = parse_markdown(&entry.body, comrak_options);
    let meta = pipeline.run(&mut doc);
    log::debug!(
        "{}: {:?}, footnotes: {:?}",
        entry.id,
        meta.minutes_read,
        meta.has_footnotes
    );

    RenderedEntry {
        html: doc.to_html(),
        meta,
        summary: generate_summary(entry, config.summary.max_length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::make_comrak_options;

    const ARTICLE: &str = "---\ntitle: Remote Work\ndescription: How teams work apart.\npubDate: 2024-03-01\ntags: [work]\n---\n\nBody text.\n";

    #[test]
    fn parses_frontmatter_and_body() {
        let entry = parse_entry(ARTICLE, "Remote Work.md", Collection::Articles).unwrap();
        assert_eq!(entry.title, "Remote Work");
        assert_eq!(entry.slug, "remote-work");
        assert_eq!(entry.description.as_deref(), Some("How teams work apart."));
        assert_eq!(entry.frontmatter.pub_date.as_deref(), Some("2024-03-01"));
        assert!(!entry.frontmatter.draft);
        assert!(entry.body.contains("Body text."));
        assert!(!entry.body.contains("title:"));
    }

    #[test]
    fn custom_slug_wins() {
        let source = "---\ntitle: Hello\nslug: custom\n---\nHi\n";
        let entry = parse_entry(source, "hello.mdx", Collection::Notes).unwrap();
        assert_eq!(entry.slug, "custom");
    }

    #[test]
    fn slugs_cannot_leave_the_collection() {
        for slug in ["../escape", "..", "nested/page", "/etc/passwd", "back\\\\slash", "\"\""] {
            let source = format!("---\ntitle: Hello\nslug: {slug}\n---\nHi\n");
            let err = parse_entry(&source, "hello.md", Collection::Articles).unwrap_err();
            assert!(
                matches!(err, Error::InvalidSlug { .. }),
                "slug {slug:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn title_is_required() {
        let err = parse_entry("No frontmatter here.\n", "x.md", Collection::Notes).unwrap_err();
        assert!(matches!(err, Error::MissingTitle { .. }));
    }

    #[test]
    fn entry_files() {
        assert!(is_entry_file(Path::new("a/post.md")));
        assert!(is_entry_file(Path::new("a/post.mdx")));
        assert!(!is_entry_file(Path::new("a/_draft.md")));
        assert!(!is_entry_file(Path::new("a/image.png")));
    }

    #[test]
    fn filters_drafts_and_styleguide() {
        let entry = |source: &str| parse_entry(source, "e.md", Collection::Articles).unwrap();
        let entries = vec![
            entry("---\ntitle: Published\n---\n"),
            entry("---\ntitle: Draft\ndraft: true\n---\n"),
            entry("---\ntitle: Styleguide\nstyleguide: true\n---\n"),
        ];
        let titles = |list: Vec<&ContentEntry>| list.iter().map(|e| e.title.clone()).collect::<Vec<_>>();

        assert_eq!(titles(filter_for_page(&entries, true)), ["Published", "Styleguide"]);
        assert_eq!(titles(filter_for_page(&entries, false)).len(), 3);
        assert_eq!(titles(filter_for_listing(&entries, true)), ["Published"]);
        assert_eq!(titles(filter_for_listing(&entries, false)), ["Published", "Draft"]);
    }

    #[test]
    fn render_entry_runs_the_pipeline() {
        let source = "---\ntitle: Notes On Notes\n---\n\nA claim worth citing in a longer opening sentence.[^1]\n\n[^1]: The citation.\n";
        let entry = parse_entry(source, "notes.md", Collection::Notes).unwrap();
        let config = SiteConfig::default();
        let rendered = render_entry(
            &entry,
            &config,
            &Pipeline::for_site(&config),
            &make_comrak_options(),
        );

        assert_eq!(rendered.meta.has_footnotes, Some(true));
        assert_eq!(rendered.meta.minutes_read.as_deref(), Some("1 min read"));
        assert!(rendered.html.contains("footnote-definition"));
        assert!(rendered.summary.starts_with("A claim worth citing"));
    }
}
