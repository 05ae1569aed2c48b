//! Match highlighting for search suggestions.

use regex::RegexBuilder;

/// A run of label text, either plain or part of a query match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

/// A label split into plain and emphasized runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub segments: Vec<Segment>,
}

impl Highlight {
    /// Split `text` around every case-insensitive occurrence of `query`.
    ///
    /// The emphasized runs keep the casing they have in `text`. The query is
    /// escaped before it becomes a pattern, so `(`, `.` or `*` match literally.
    pub fn new(text: &str, query: &str) -> Self {
        let query = query.trim();
        let plain = || Self {
            segments: vec![Segment {
                text: text.to_string(),
                emphasized: false,
            }],
        };

        if query.is_empty() || text.is_empty() {
            return plain();
        }

        let pattern = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::debug!("Highlight pattern rejected for {:?}: {}", query, e);
                return plain();
            }
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            if m.start() > last {
                segments.push(Segment {
                    text: text[last..m.start()].to_string(),
                    emphasized: false,
                });
            }
            segments.push(Segment {
                text: m.as_str().to_string(),
                emphasized: true,
            });
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment {
                text: text[last..].to_string(),
                emphasized: false,
            });
        }

        Self { segments }
    }

    /// Whether any run is emphasized.
    pub fn has_match(&self) -> bool {
        self.segments.iter().any(|s| s.emphasized)
    }

    /// Render with emphasized runs wrapped in `open`/`close`, no escaping.
    pub fn to_marked(&self, open: &str, close: &str) -> String {
        self.render(open, close, |s| s.to_string())
    }

    /// Render as HTML: text escaped, matches wrapped in `<mark>`.
    pub fn to_html(&self) -> String {
        self.render("<mark>", "</mark>", escape_html)
    }

    fn render<F>(&self, open: &str, close: &str, escape: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            if segment.emphasized {
                out.push_str(open);
                out.push_str(&escape(&segment.text));
                out.push_str(close);
            } else {
                out.push_str(&escape(&segment.text));
            }
        }
        out
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
