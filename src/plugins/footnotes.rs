use super::DocumentTransform;
use crate::domain::DerivedMeta;
use crate::tree::{Document, Node};

/// True if any node in `nodes`, at any depth, is a footnote definition.
///
/// Footnote syntax inside code parses to code nodes, so it never counts.
pub fn has_footnote_definitions(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match node {
        Node::FootnoteDefinition { .. } => true,
        _ => has_footnote_definitions(node.children()),
    })
}

/// Writes `hasFootnotes` into the derived metadata so pages can skip
/// footnote assets when there are none.
pub struct FootnoteDetector;

impl DocumentTransform for FootnoteDetector {
    fn name(&self) -> &'static str {
        "footnote-detector"
    }

    fn transform(&self, doc: &mut Document, meta: &mut DerivedMeta) {
        meta.has_footnotes = Some(has_footnote_definitions(&doc.children));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{make_comrak_options, parse_markdown};

    fn detect(markdown: &str) -> bool {
        let mut doc = parse_markdown(markdown, &make_comrak_options());
        let mut meta = DerivedMeta::default();
        FootnoteDetector.transform(&mut doc, &mut meta);
        meta.has_footnotes.unwrap_or_default()
    }

    #[test]
    fn empty_tree_has_no_footnotes() {
        assert!(!has_footnote_definitions(&Document::default().children));
    }

    #[test]
    fn finds_nested_definitions() {
        let nodes = vec![Node::element(
            "blockquote",
            vec![Node::element(
                "div",
                vec![Node::FootnoteDefinition {
                    label: "1".to_string(),
                    children: vec![Node::text("note")],
                }],
            )],
        )];
        assert!(has_footnote_definitions(&nodes));
    }

    #[test]
    fn literal_syntax_in_code_is_ignored() {
        let nodes = vec![
            Node::InlineCode("[^1]".to_string()),
            Node::CodeBlock {
                lang: None,
                value: "[^1]: not a footnote".to_string(),
            },
        ];
        assert!(!has_footnote_definitions(&nodes));
    }

    #[test]
    fn detects_from_markdown() {
        assert!(detect("Claim.[^src]\n\n[^src]: Source.\n"));
        assert!(!detect("No notes here.\n"));
        assert!(!detect("Write `[^1]` for a note.\n\n```md\n[^1]: like this\n```\n"));
    }

    #[test]
    fn unreferenced_definition_still_counts() {
        assert!(detect("Nothing cites it.\n\n[^1]: A note left behind.\n"));
        assert!(!detect("Nothing cites it.\n\n~~~\n[^1]: inside a fence\n~~~\n"));
    }
}
