use std::fs;
use std::path::Path;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::RenderedEntry;
use crate::domain::{ContentEntry, Page};
use crate::error::Result;

const BASE_TEMPLATE: &str = include_str!("../templates/base.html");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Loads `templates/**/*.html` from `template_dir`, or the built-in
/// templates when no directory is given.
pub fn init_tera(template_dir: Option<&Path>) -> Result<Tera> {
    match template_dir {
        Some(dir) => {
            let glob = dir.join("**").join("*.html");
            Ok(Tera::new(&glob.to_string_lossy())?)
        }
        None => {
            let mut tera = Tera::default();
            tera.add_raw_templates(vec![
                ("base.html", BASE_TEMPLATE),
                ("index.html", INDEX_TEMPLATE),
            ])?;
            Ok(tera)
        }
    }
}

/// Renders one entry page into `html_path`. `page_dir` is the page's
/// directory relative to the output root.
pub fn render_page(
    tera: &Tera,
    config: &SiteConfig,
    entry: &ContentEntry,
    rendered: &RenderedEntry,
    page_dir: &Path,
    html_path: &Path,
) -> Result<()> {
    let mut context = Context::new();
    context.insert("site", &config.site);
    context.insert("author", &config.author);
    context.insert("title", &entry.title);
    context.insert("collection", &entry.collection);
    context.insert("entry", &entry.frontmatter);
    context.insert("derived", &rendered.meta);
    context.insert("summary", &rendered.summary);
    context.insert("relative_path", &href_to_root(page_dir));
    context.insert("content", &rendered.html);

    let html = tera.render("base.html", &context)?;
    if let Some(parent) = html_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(html_path, html)?;
    log::info!("Wrote HTML: {}", html_path.display());
    Ok(())
}

pub fn render_index(tera: &Tera, config: &SiteConfig, output_dir: &Path, pages: &[Page]) -> Result<()> {
    let mut context = Context::new();
    context.insert("site", &config.site);
    context.insert("author", &config.author);
    context.insert("pages", pages);

    let index_html = tera.render("index.html", &context)?;
    let index_path = output_dir.join("index.html");
    fs::write(&index_path, index_html)?;
    log::info!("Wrote index: {}", index_path.display());
    Ok(())
}

/// Relative href from a page directory back to the site root, e.g.
/// `writing/2024` becomes `../..`.
pub fn href_to_root(page_dir: &Path) -> String {
    let depth = page_dir.components().count();
    if depth == 0 {
        ".".to_string()
    } else {
        vec![".."; depth].join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Collection, DerivedMeta};
    use std::path::PathBuf;

    #[test]
    fn href_to_root_depths() {
        assert_eq!(href_to_root(Path::new("")), ".");
        assert_eq!(href_to_root(Path::new("notes")), "..");
        assert_eq!(href_to_root(Path::new("writing/2024")), "../..");
    }

    #[test]
    fn builtin_index_lists_pages() {
        let tera = init_tera(None).unwrap();
        let config = SiteConfig::default();
        let pages = vec![Page {
            title: "First Post".to_string(),
            collection: Collection::Articles,
            summary: "What this post is about.".to_string(),
            pub_date: Some("2024-01-02".to_string()),
            minutes_read: Some("3 min read".to_string()),
            path: PathBuf::from("writing/first-post.html"),
        }];
        let mut context = Context::new();
        context.insert("site", &config.site);
        context.insert("author", &config.author);
        context.insert("pages", &pages);

        let html = tera.render("index.html", &context).unwrap();
        assert!(html.contains("<a href=\"writing/first-post.html\">First Post</a>"));
        assert!(html.contains("2024-01-02 · 3 min read"));
        assert!(html.contains("What this post is about."));
    }

    #[test]
    fn builtin_page_includes_derived_values() {
        let tera = init_tera(None).unwrap();
        let config = SiteConfig::default();
        let entry = ContentEntry::new("Hello", None, "Body");
        let rendered = RenderedEntry {
            html: "<p>Body</p>\n".to_string(),
            meta: DerivedMeta {
                minutes_read: Some("1 min read".to_string()),
                has_footnotes: Some(false),
            },
            summary: "Body".to_string(),
        };
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("writing").join("hello.html");

        render_page(&tera, &config, &entry, &rendered, Path::new("writing"), &html_path).unwrap();

        let html = fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("1 min read"));
        assert!(html.contains("href=\"../style.css\""));
        assert!(!html.contains("footnotes.js"));
    }
}
