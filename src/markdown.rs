use std::sync::LazyLock;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use regex::Regex;
use crate::tree::{Document, Element, Node};

/// Start of a footnote definition line, capturing its label.
static FOOTNOTE_DEFINITION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?m)^ {0,3}\[\^([^\]\s]+)\]:"));

pub fn make_comrak_options() -> ComrakOptions {
    let mut comrak_options = ComrakOptions::default();
    comrak_options.extension.table = true;
    comrak_options.extension.autolink = true;
    comrak_options.extension.strikethrough = true;
    comrak_options.extension.tasklist = true;
    comrak_options.extension.footnotes = true;
    comrak_options.parse.smart = true;
    comrak_options
}

/// Parses markdown into a [`Document`].
///
/// comrak only keeps footnote definitions that something references, so
/// every definition-like label gets a reference in a trailing paragraph that
/// is dropped again after conversion. Unreferenced definitions survive as
/// [`Node::FootnoteDefinition`]; lookalikes inside code stay code.
pub fn parse_markdown(markdown: &str, comrak_options: &ComrakOptions) -> Document {
    let anchors = definition_anchors(markdown);
    let source = match &anchors {
        Some(anchors) => format!("{markdown}\n\n{anchors}\n"),
        None => markdown.to_string(),
    };

    let arena = Arena::new();
    let root = parse_document(&arena, &source, comrak_options);
    let mut children = convert_children(root);
    if let Some(anchors) = anchors {
        remove_anchor_paragraph(&mut children, &anchors);
    }
    Document::new(children)
}

/// One `[^label]` per distinct definition-like label in `markdown`.
fn definition_anchors(markdown: &str) -> Option<String> {
    if !markdown.contains("[^") {
        return None;
    }
    let regex = match FOOTNOTE_DEFINITION.as_ref() {
        Ok(regex) => regex,
        Err(err) => {
            log::warn!("Footnote definition pattern failed to compile: {err}");
            return None;
        }
    };

    // Source order, so unreferenced definitions keep their written order.
    let mut labels: Vec<&str> = Vec::new();
    for label in regex.captures_iter(markdown).filter_map(|caps| caps.get(1)) {
        if !labels.contains(&label.as_str()) {
            labels.push(label.as_str());
        }
    }
    if labels.is_empty() {
        return None;
    }
    Some(labels.iter().map(|label| format!("[^{label}]")).collect())
}

/// Drops the trailing paragraph added by [`definition_anchors`].
///
/// comrak appends definitions after the last block, so the anchors are the
/// last node that is not a definition. Unresolved anchors come back as text.
fn remove_anchor_paragraph(children: &mut Vec<Node>, anchors: &str) {
    let Some(index) = children
        .iter()
        .rposition(|node| !matches!(node, Node::FootnoteDefinition { .. }))
    else {
        return;
    };
    let Node::Element(paragraph) = &children[index] else {
        return;
    };
    if paragraph.tag != "p" {
        return;
    }

    let mut written = String::new();
    for child in &paragraph.children {
        match child {
            Node::FootnoteReference { label } => {
                written.push_str("[^");
                written.push_str(label);
                written.push(']');
            }
            Node::Text(text) => written.push_str(text),
            _ => return,
        }
    }
    if written.trim().eq_ignore_ascii_case(anchors) {
        children.remove(index);
    }
}

fn convert_children<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    node.children().filter_map(convert_node).collect()
}

fn convert_node<'a>(node: &'a AstNode<'a>) -> Option<Node> {
    let value = node.data.borrow().value.clone();
    let element = |tag: &str| Some(Node::Element(Element::new(tag, convert_children(node))));

    match value {
        NodeValue::Text(text) => Some(Node::Text(text)),
        NodeValue::Code(code) => Some(Node::InlineCode(code.literal)),
        NodeValue::CodeBlock(block) => {
            let lang = block.info.split_whitespace().next().map(str::to_string);
            Some(Node::CodeBlock { lang, value: block.literal })
        }
        NodeValue::HtmlBlock(block) => Some(Node::Html(block.literal)),
        NodeValue::HtmlInline(raw) => Some(Node::Html(raw)),
        NodeValue::SoftBreak => Some(Node::text("\n")),
        NodeValue::LineBreak => element("br"),
        NodeValue::Paragraph => element("p"),
        NodeValue::Heading(heading) => element(&format!("h{}", heading.level)),
        NodeValue::BlockQuote => element("blockquote"),
        NodeValue::ThematicBreak => element("hr"),
        NodeValue::List(list) => {
            let tag = match list.list_type {
                ListType::Bullet => "ul",
                ListType::Ordered => "ol",
            };
            let mut el = Element::new(tag, convert_children(node));
            if matches!(list.list_type, ListType::Ordered) && list.start != 1 {
                el.attributes.push(("start".to_string(), list.start.to_string()));
            }
            Some(Node::Element(el))
        }
        NodeValue::Item(_) | NodeValue::TaskItem(..) => element("li"),
        NodeValue::Emph => element("em"),
        NodeValue::Strong => element("strong"),
        NodeValue::Strikethrough => element("del"),
        NodeValue::Superscript => element("sup"),
        NodeValue::Link(link) => {
            let mut el = Element::new("a", convert_children(node));
            el.attributes.push(("href".to_string(), link.url));
            if !link.title.is_empty() {
                el.attributes.push(("title".to_string(), link.title));
            }
            Some(Node::Element(el))
        }
        NodeValue::Image(link) => {
            let alt = Document::new(convert_children(node)).plain_text();
            let mut el = Element::new("img", Vec::new());
            el.attributes.push(("src".to_string(), link.url));
            el.attributes.push(("alt".to_string(), alt));
            Some(Node::Element(el))
        }
        NodeValue::Table(..) => element("table"),
        NodeValue::TableRow(..) => element("tr"),
        NodeValue::TableCell => element("td"),
        NodeValue::FootnoteDefinition(def) => Some(Node::FootnoteDefinition {
            label: def.name,
            children: convert_children(node),
        }),
        NodeValue::FootnoteReference(reference) => Some(Node::FootnoteReference {
            label: reference.name,
        }),
        NodeValue::FrontMatter(_) => None,
        // Containers without a dedicated tag keep their content.
        _ => element("div"),
    }
}
