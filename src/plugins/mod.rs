//! Build-time transforms over a parsed [`Document`].
//!
//! Each transform either annotates the tree in place or writes a computed
//! value into the entry's [`DerivedMeta`]. They run once per document, in
//! the order they were added to a [`Pipeline`].

mod footnotes;
mod list_density;
mod reading_time;

pub use footnotes::{has_footnote_definitions, FootnoteDetector};
pub use list_density::{
    classify_list_density, ListDensity, ListDensityOptions, DEFAULT_LIST_THRESHOLD,
    LONG_LIST_ITEMS_CLASS,
};
pub use reading_time::{
    estimate_reading_time, reading_time, ReadingTime, ReadingTimeEstimator,
    DEFAULT_WORDS_PER_MINUTE,
};

use crate::config::SiteConfig;
use crate::domain::DerivedMeta;
use crate::tree::Document;

pub trait DocumentTransform {
    fn name(&self) -> &'static str;

    fn transform(&self, doc: &mut Document, meta: &mut DerivedMeta);
}

#[derive(Default)]
pub struct Pipeline {
    transforms: Vec<Box<dyn DocumentTransform>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The transforms every page goes through, tuned by the site config.
    pub fn for_site(config: &SiteConfig) -> Self {
        Self::new()
            .with(ReadingTimeEstimator::new(config.reading.words_per_minute))
            .with(FootnoteDetector)
            .with(ListDensity::new(ListDensityOptions {
                threshold: config.lists.threshold,
            }))
    }

    pub fn with(mut self, transform: impl DocumentTransform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn run(&self, doc: &mut Document) -> DerivedMeta {
        let mut meta = DerivedMeta::default();
        for transform in &self.transforms {
            log::trace!("Running transform {}", transform.name());
            transform.transform(doc, &mut meta);
        }
        meta
    }
}
