use std::path::{Path, PathBuf};
use clap::Parser;
use crate::config::SiteConfig;
use crate::content::{filter_for_listing, filter_for_page, load_collection, render_entry};
use crate::domain::{Collection, Page};
use crate::fs::{copy_collection_assets, prepare_output_dir};
use crate::markdown::make_comrak_options;
use crate::plugins::Pipeline;
use crate::template::{init_tera, render_index, render_page};

pub mod config;
pub mod content;
pub mod domain;
pub mod error;
pub mod fs;
pub mod markdown;
pub mod plugins;
pub mod summary;
pub mod template;
pub mod tree;

pub use error::{Error, Result};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the `articles` and `notes` collections
    #[arg(short, long)]
    pub content_dir: PathBuf,

    /// Path to the output directory
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Site config (YAML); defaults are used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory of Tera templates overriding the built-in ones
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Leave drafts out of the build
    #[arg(long)]
    pub production: bool,
}

pub fn build_site(args: &Args) -> Result<()> {
    log::info!("Building site...");

    let config = SiteConfig::load(args.config.as_deref())?;
    let tera = init_tera(args.templates.as_deref())?;
    prepare_output_dir(&args.output_dir)?;
    let comrak_options = make_comrak_options();
    let pipeline = Pipeline::for_site(&config);

    let mut pages: Vec<Page> = Vec::new();
    for collection in Collection::ALL {
        let entries = load_collection(&args.content_dir, collection)?;
        let listed: Vec<&str> = filter_for_listing(&entries, args.production)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();

        for entry in filter_for_page(&entries, args.production) {
            log::info!("Converting markdown: {}/{}", collection.dir_name(), entry.id);
            let rendered = render_entry(entry, &config, &pipeline, &comrak_options);

            let relative_html = Path::new(collection.route()).join(format!("{}.html", entry.slug));
            let page_dir = relative_html.parent().unwrap_or_else(|| Path::new(""));
            render_page(
                &tera,
                &config,
                entry,
                &rendered,
                page_dir,
                &args.output_dir.join(&relative_html),
            )?;

            if listed.contains(&entry.id.as_str()) {
                pages.push(Page {
                    title: entry.title.clone(),
                    collection,
                    summary: rendered.summary,
                    pub_date: entry.frontmatter.pub_date.clone(),
                    minutes_read: rendered.meta.minutes_read,
                    path: relative_html,
                });
            }
        }

        let copied = copy_collection_assets(&args.content_dir, &args.output_dir, collection)?;
        log::debug!("Copied {copied} assets for {}", collection.dir_name());
    }

    // Newest first; undated entries last.
    pages.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    render_index(&tera, &config, &args.output_dir, &pages)?;

    log::info!("Site built successfully.");
    Ok(())
}
