//! Regex-driven HTML tokenizer building a [`DocumentTree`].
//!
//! This is not a conforming HTML5 parser. It understands what documentation
//! generators emit: nested tags, quoted attributes, void and self-closing
//! elements, comments, raw-text `script`/`style` blocks and the handful of
//! implied end tags (`p`, `li`, `dt`, `dd`) such output relies on.

use super::tree::{DocumentTree, ElementData, Node, NodeId};
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<!--.*?-->|<![^>]*>|<\?[^>]*>|<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"'=]|=\s*"[^"]*"|=\s*'[^']*'|["'=])*)>"#,
    )
    .unwrap()
});

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s=/"'>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[A-Za-z]+);").unwrap());

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "template"];

impl DocumentTree {
    /// Parse rendered HTML into a tree.
    pub fn parse(html: &str) -> Self {
        let mut builder = TreeBuilder::new();
        let mut pos = 0;

        while let Some(caps) = TOKEN_RE.captures_at(html, pos) {
            let Some(whole) = caps.get(0) else { break };
            if whole.start() > pos {
                builder.text(&html[pos..whole.start()]);
            }
            pos = whole.end();

            let Some(name) = caps.get(2) else {
                // comment, doctype or processing instruction
                continue;
            };
            let tag = name.as_str().to_ascii_lowercase();
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());

            if closing {
                builder.close(&tag);
                continue;
            }

            let attrs = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
            let self_closing = attrs.trim_end().ends_with('/');

            if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                // Skip to the matching end tag without tokenizing the body.
                let close = format!("</{}", tag);
                pos = find_ascii_case_insensitive(html, &close, pos)
                    .and_then(|start| html[start..].find('>').map(|end| start + end + 1))
                    .unwrap_or(html.len());
                continue;
            }

            builder.open(tag, attrs, self_closing);
        }

        if pos < html.len() {
            builder.text(&html[pos..]);
        }

        builder.finish()
    }
}

struct TreeBuilder {
    elements: Vec<ElementData>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            elements: vec![ElementData::root()],
            stack: vec![DocumentTree::ROOT],
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(DocumentTree::ROOT)
    }

    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let decoded = decode_entities(raw);
        let current = self.current();
        let children = &mut self.elements[current].children;
        match children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(&decoded),
            _ => children.push(Node::Text(decoded)),
        }
    }

    fn open(&mut self, tag: String, attrs: &str, self_closing: bool) {
        self.close_implied(&tag);

        let mut id = None;
        let mut classes = Vec::new();
        let mut href = None;
        for caps in ATTR_RE.captures_iter(attrs) {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            match name.as_str() {
                "id" => id = Some(value),
                "class" => classes = value.split_whitespace().map(str::to_string).collect(),
                "href" => href = Some(value),
                _ => {}
            }
        }

        let parent = self.current();
        let node = self.elements.len();
        let is_void = self_closing || VOID_ELEMENTS.contains(&tag.as_str());
        self.elements.push(ElementData {
            tag,
            id,
            classes,
            href,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.elements[parent].children.push(Node::Element(node));

        if !is_void {
            self.stack.push(node);
        }
    }

    /// Close an open `p`, `li`, `dt` or `dd` that the new start tag ends implicitly.
    fn close_implied(&mut self, tag: &str) {
        let top = self.current();
        let top_tag = self.elements[top].tag.as_str();
        let implied = match tag {
            "dt" | "dd" => matches!(top_tag, "dt" | "dd"),
            "li" => top_tag == "li",
            "p" | "div" | "ul" | "ol" | "dl" | "pre" | "table" | "h1" | "h2" | "h3" | "h4"
            | "h5" | "h6" | "section" => top_tag == "p",
            _ => false,
        };
        if implied {
            self.stack.pop();
        }
    }

    fn close(&mut self, tag: &str) {
        // Stray end tags with no matching open element are dropped.
        if let Some(depth) = self
            .stack
            .iter()
            .rposition(|&id| id != DocumentTree::ROOT && self.elements[id].tag == tag)
        {
            self.stack.truncate(depth);
        }
    }

    fn finish(self) -> DocumentTree {
        DocumentTree {
            elements: self.elements,
        }
    }
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Decode the character references documentation generators actually emit.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match body {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    "para" => Some('¶'),
                    "hellip" => Some('…'),
                    "ndash" => Some('–'),
                    "mdash" => Some('—'),
                    "copy" => Some('©'),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let tree = DocumentTree::parse(
            r#"<html><body><div id="main" class="section intro"><h1>Title</h1><p>Body</p></div></body></html>"#,
        );

        let h1 = tree.elements_by_tag("h1").next().unwrap();
        assert_eq!(h1.text_content(), "Title");
        assert_eq!(h1.heading_level(), Some(1));

        let div = h1.parent().unwrap();
        assert_eq!(div.id(), Some("main"));
        assert!(div.has_class("section"));
        assert!(div.has_class("intro"));

        let tags: Vec<&str> = h1.ancestors().map(|el| el.tag()).collect();
        assert_eq!(tags, vec!["div", "body", "html"]);
    }

    #[test]
    fn test_void_and_self_closing_elements() {
        let tree = DocumentTree::parse(r#"<p>a<br>b<img src="x.png"/>c</p><h2>After</h2>"#);
        let p = tree.elements_by_tag("p").next().unwrap();
        assert_eq!(p.text_content(), "abc");

        let h2 = tree.elements_by_tag("h2").next().unwrap();
        assert!(h2.parent().is_none());
    }

    #[test]
    fn test_comments_and_scripts_are_skipped() {
        let tree = DocumentTree::parse(
            "<!DOCTYPE html><div><!-- <h1>hidden</h1> --><script>var s = '<h2>no</h2>';</script><h3>Shown</h3></div>",
        );
        assert_eq!(tree.elements_by_tag("h1").count(), 0);
        assert_eq!(tree.elements_by_tag("h2").count(), 0);
        assert_eq!(tree.elements_by_tag("h3").count(), 1);
    }

    #[test]
    fn test_implied_end_tags() {
        let tree = DocumentTree::parse("<dl><dt>one<dd>first<dt>two<dd>second</dl>");
        let dts: Vec<_> = tree.elements_by_tag("dt").collect();
        assert_eq!(dts.len(), 2);
        assert_eq!(dts[0].text_content(), "one");
        assert_eq!(dts[1].parent().unwrap().tag(), "dl");
    }

    #[test]
    fn test_stray_close_tag_ignored() {
        let tree = DocumentTree::parse("<div id=\"a\"><span>x</em></span><h4>y</h4></div>");
        let h4 = tree.elements_by_tag("h4").next().unwrap();
        assert_eq!(h4.parent().unwrap().id(), Some("a"));
    }

    #[test]
    fn test_attribute_quoting_styles() {
        let tree = DocumentTree::parse(r#"<a id=plain class='x y' href="/a?b=1&amp;c=2">l</a>"#);
        let a = tree.elements().next().unwrap();
        assert_eq!(a.id(), Some("plain"));
        assert_eq!(a.classes(), &["x".to_string(), "y".to_string()]);
        assert_eq!(a.href(), Some("/a?b=1&c=2"));
    }

    #[test]
    fn test_stray_quote_in_unquoted_value() {
        let tree = DocumentTree::parse(
            r#"<h2 title=it's>Lost Heading</h2><h2 id="b" title="a>b">Second Heading</h2>"#,
        );
        let headings: Vec<_> = tree.elements_by_tag("h2").collect();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].text_content(), "Lost Heading");
        assert_eq!(headings[1].id(), Some("b"));
        assert_eq!(headings[1].text_content(), "Second Heading");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&#182;&#x00B6;"), "¶¶");
        assert_eq!(decode_entities("&unknown; stays"), "&unknown; stays");
    }

    #[test]
    fn test_code_blocks_keep_whitespace() {
        let tree = DocumentTree::parse(
            "<div class=\"highlight\"><pre><span>circle = Circle()</span>\n<span>self.play(ShowCreation(circle))</span></pre></div>",
        );
        assert_eq!(
            tree.code_blocks(),
            vec!["circle = Circle()\nself.play(ShowCreation(circle))".to_string()]
        );
    }

    #[test]
    fn test_empty_input() {
        let tree = DocumentTree::parse("");
        assert_eq!(tree.element_count(), 0);
        assert!(tree.title().is_none());
    }
}
