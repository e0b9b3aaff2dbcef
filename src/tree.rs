//! Document tree shared by the markdown front end, the transforms and the
//! HTML writer.

/// Root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    InlineCode(String),
    CodeBlock { lang: Option<String>, value: String },
    /// Raw HTML passed through untouched.
    Html(String),
    FootnoteDefinition { label: String, children: Vec<Node> },
    FootnoteReference { label: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "blockquote", "table", "thead",
    "tbody", "tr", "th", "td", "hr", "dl", "dt", "dd",
];

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Concatenated text content of the whole document.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_text(&mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_html(&mut out);
        }
        out
    }
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element::new(tag, children))
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(el) => &el.children,
            Node::FootnoteDefinition { children, .. } => children,
            _ => &[],
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(value) | Node::InlineCode(value) => out.push_str(value),
            Node::CodeBlock { value, .. } => {
                out.push_str(value);
                out.push('\n');
            }
            Node::Html(_) | Node::FootnoteReference { .. } => {}
            Node::FootnoteDefinition { children, .. } => {
                for child in children {
                    child.write_text(out);
                }
                out.push('\n');
            }
            Node::Element(el) => {
                match el.tag.as_str() {
                    "br" => out.push('\n'),
                    // Images carry their text in `alt`.
                    "img" => {
                        if let Some(alt) = el.attribute("alt") {
                            out.push(' ');
                            out.push_str(alt);
                            out.push(' ');
                        }
                    }
                    _ => {}
                }
                for child in &el.children {
                    child.write_text(out);
                }
                if el.is_block() {
                    out.push('\n');
                }
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(value) => out.push_str(&escape_html(value)),
            Node::InlineCode(value) => {
                out.push_str("<code>");
                out.push_str(&escape_html(value));
                out.push_str("</code>");
            }
            Node::CodeBlock { lang, value } => {
                match lang {
                    Some(lang) => out.push_str(&format!(
                        "<pre><code class=\"language-{}\">",
                        escape_html(lang)
                    )),
                    None => out.push_str("<pre><code>"),
                }
                out.push_str(&escape_html(value));
                out.push_str("</code></pre>\n");
            }
            Node::Html(raw) => out.push_str(raw),
            Node::FootnoteReference { label } => {
                let label = escape_html(label);
                out.push_str(&format!(
                    "<sup class=\"footnote-ref\"><a href=\"#fn-{label}\" id=\"fnref-{label}\">{label}</a></sup>"
                ));
            }
            Node::FootnoteDefinition { label, children } => {
                let label = escape_html(label);
                out.push_str(&format!(
                    "<div class=\"footnote-definition\" id=\"fn-{label}\"><sup class=\"footnote-definition-label\">{label}</sup>"
                ));
                for child in children {
                    child.write_html(out);
                }
                out.push_str(&format!(
                    "<a href=\"#fnref-{label}\" class=\"footnote-backref\">↩</a></div>\n"
                ));
            }
            Node::Element(el) => el.write_html(out),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            children,
            ..Default::default()
        }
    }

    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn is_list(&self) -> bool {
        self.tag == "ul" || self.tag == "ol"
    }

    pub fn is_block(&self) -> bool {
        BLOCK_TAGS.contains(&self.tag.as_str())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds `class` unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_html(&self.classes.join(" "))));
        }
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            if self.is_block() {
                out.push('\n');
            }
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        if self.is_block() {
            out.push('\n');
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
