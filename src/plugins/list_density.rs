//! Marks prose-heavy lists so CSS can give their items more room.
//!
//! Only top-level `ul`/`ol` elements are classified. An item's length is the
//! text it holds directly, including inline wrappers such as `em`, `strong`,
//! `a` and `code`, but never text from a list nested inside it.

use super::DocumentTransform;
use crate::domain::DerivedMeta;
use crate::tree::{Document, Element, Node};

pub const LONG_LIST_ITEMS_CLASS: &str = "long-list-items";
pub const DEFAULT_LIST_THRESHOLD: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListDensityOptions {
    /// Average characters per item above which a list counts as long.
    pub threshold: f64,
}

impl Default for ListDensityOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_LIST_THRESHOLD,
        }
    }
}

pub struct ListDensity {
    options: ListDensityOptions,
}

impl ListDensity {
    pub fn new(options: ListDensityOptions) -> Self {
        Self { options }
    }
}

impl Default for ListDensity {
    fn default() -> Self {
        Self::new(ListDensityOptions::default())
    }
}

impl DocumentTransform for ListDensity {
    fn name(&self) -> &'static str {
        "list-density"
    }

    fn transform(&self, doc: &mut Document, _meta: &mut DerivedMeta) {
        classify_list_density(doc, &self.options);
    }
}

pub fn classify_list_density(doc: &mut Document, options: &ListDensityOptions) {
    visit(&mut doc.children, false, options);
}

fn visit(nodes: &mut [Node], inside_item: bool, options: &ListDensityOptions) {
    for node in nodes {
        match node {
            Node::Element(el) => {
                if el.is_list() && !inside_item {
                    classify(el, options.threshold);
                }
                let inside_item = inside_item || el.tag == "li";
                visit(&mut el.children, inside_item, options);
            }
            Node::FootnoteDefinition { children, .. } => visit(children, inside_item, options),
            _ => {}
        }
    }
}

fn classify(list: &mut Element, threshold: f64) {
    let lengths: Vec<usize> = list
        .children
        .iter()
        .filter_map(|child| match child {
            Node::Element(item) if item.tag == "li" => Some(direct_text_length(&item.children)),
            _ => None,
        })
        .collect();
    if lengths.is_empty() {
        return;
    }

    let average = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    if average > threshold {
        list.add_class(LONG_LIST_ITEMS_CLASS);
    }
}

fn direct_text_length(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(value) | Node::InlineCode(value) => value.chars().count(),
            Node::CodeBlock { value, .. } => value.chars().count(),
            Node::Element(el) if !el.is_list() => direct_text_length(&el.children),
            _ => 0,
        })
        .sum()
}
