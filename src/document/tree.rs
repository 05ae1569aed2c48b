//! Read-only element tree over a rendered page.

/// Index of an element inside a [`DocumentTree`].
pub type NodeId = usize;

/// Child of an element: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Element(NodeId),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    pub(crate) tag: String,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) href: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<Node>,
}

impl ElementData {
    pub(crate) fn root() -> Self {
        Self {
            tag: "#document".to_string(),
            id: None,
            classes: Vec::new(),
            href: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A parsed page.
///
/// Element 0 is a synthetic document root; every other element is stored in
/// the order its start tag appeared, so iterating [`DocumentTree::elements`]
/// walks the page in document order.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    pub(crate) elements: Vec<ElementData>,
}

impl DocumentTree {
    pub(crate) const ROOT: NodeId = 0;

    /// An empty page.
    pub fn empty() -> Self {
        Self {
            elements: vec![ElementData::root()],
        }
    }

    /// Number of real elements (the synthetic root is not counted).
    pub fn element_count(&self) -> usize {
        self.elements.len() - 1
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        (1..self.elements.len()).map(move |id| ElementRef { tree: self, id })
    }

    /// Elements with the given tag name, in document order.
    pub fn elements_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements().filter(move |el| el.tag() == tag)
    }

    /// Look up an element by its `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|el| el.id() == Some(id))
    }

    /// Text of every `pre` block, in document order.
    pub fn code_blocks(&self) -> Vec<String> {
        self.elements_by_tag("pre")
            .map(|el| el.raw_text())
            .collect()
    }

    /// The page title (`title` element), if any.
    pub fn title(&self) -> Option<String> {
        self.elements_by_tag("title")
            .map(|el| el.text_content())
            .find(|t| !t.is_empty())
    }
}

/// Borrowed handle to one element of a [`DocumentTree`].
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a DocumentTree,
    id: NodeId,
}

impl<'a> ElementRef<'a> {
    fn data(&self) -> &'a ElementData {
        &self.tree.elements[self.id]
    }

    /// Position of this element in document order.
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &'a str {
        &self.data().tag
    }

    /// The `id` attribute, when present and non-blank.
    pub fn id(&self) -> Option<&'a str> {
        self.data().id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// The `href` attribute, when present.
    pub fn href(&self) -> Option<&'a str> {
        self.data().href.as_deref()
    }

    /// Tokens of the `class` attribute.
    pub fn classes(&self) -> &'a [String] {
        &self.data().classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.data().classes.iter().any(|c| c == class)
    }

    /// Heading level for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        let tag = self.tag().as_bytes();
        match tag {
            [b'h', level @ b'1'..=b'6'] => Some(level - b'0'),
            _ => None,
        }
    }

    /// Parent element; `None` for top-level elements.
    pub fn parent(&self) -> Option<ElementRef<'a>> {
        match self.data().parent {
            Some(parent) if parent != DocumentTree::ROOT => Some(ElementRef {
                tree: self.tree,
                id: parent,
            }),
            _ => None,
        }
    }

    /// Ancestors from the parent outwards.
    pub fn ancestors(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        std::iter::successors(self.parent(), |el| el.parent())
    }

    /// Whitespace-collapsed text of this element and all descendants.
    pub fn text_content(&self) -> String {
        self.text_content_filtered(|_| true)
    }

    /// Like [`text_content`](Self::text_content), skipping descendant elements
    /// (and their subtrees) for which `keep` returns false.
    pub fn text_content_filtered<F>(&self, keep: F) -> String
    where
        F: Fn(&ElementRef<'a>) -> bool,
    {
        let mut raw = String::new();
        self.collect_text(&keep, &mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Text with whitespace preserved, as in a `pre` block.
    pub fn raw_text(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&|_: &ElementRef<'a>| true, &mut raw);
        raw
    }

    fn collect_text<F>(&self, keep: &F, out: &mut String)
    where
        F: Fn(&ElementRef<'a>) -> bool,
    {
        // Explicit stack; pages can nest arbitrarily deep.
        let mut pending: Vec<&'a Node> = self.data().children.iter().rev().collect();
        while let Some(node) = pending.pop() {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(id) => {
                    let child = ElementRef {
                        tree: self.tree,
                        id: *id,
                    };
                    if keep(&child) {
                        pending.extend(child.data().children.iter().rev());
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementRef")
            .field("node_id", &self.id)
            .field("tag", &self.tag())
            .field("id", &self.id())
            .field("classes", &self.classes())
            .finish()
    }
}
