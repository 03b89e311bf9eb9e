// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Generic markup node
//!
//! Every grammar lowers its input into the same owned [`Node`] tree, so the
//! extraction heuristics never see a grammar-specific representation. Tag and
//! attribute names are compared case-insensitively throughout.

/// Tag name of the synthetic root that owns every parsed tree
pub const DOCUMENT_TAG: &str = "#document";

/// A text run positioned among a node's children
#[derive(Debug, Clone, PartialEq, Eq)]
struct TextSegment {
    /// Number of child elements that precede this text run
    before_child: usize,
    text: String,
}

/// A single element of a parsed markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    segments: Vec<TextSegment>,
}

impl Node {
    /// Create an element with the given tag name (stored lowercased)
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.trim().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Create an empty document root
    #[must_use]
    pub fn document() -> Self {
        Self::new(DOCUMENT_TAG)
    }

    /// Create a document root holding nothing but the raw text
    #[must_use]
    pub fn text_leaf(raw: &str) -> Self {
        let mut root = Self::document();
        root.push_text(raw);
        root
    }

    /// Builder-style attribute setter
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child appender
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.push_child(child);
        self
    }

    /// Builder-style text appender
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.push_text(text);
        self
    }

    /// Set an attribute. The first occurrence of a name wins, as in HTML.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name.is_empty() || self.has_attr(name) {
            return;
        }
        self.attributes.push((name.to_string(), value.to_string()));
    }

    /// Append a child element
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Append a text run after the current last child
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let before_child = self.children.len();
        match self.segments.last_mut() {
            Some(last) if last.before_child == before_child => last.text.push_str(text),
            _ => self.segments.push(TextSegment {
                before_child,
                text: text.to_string(),
            }),
        }
    }

    /// Lowercased tag name
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Case-insensitive tag comparison
    #[must_use]
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Whether this is the synthetic document root
    #[must_use]
    pub fn is_document(&self) -> bool {
        self.tag == DOCUMENT_TAG
    }

    /// Look up an attribute value by case-insensitive name
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute is present (even if empty)
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// First attribute among `names` carrying a non-blank value, trimmed
    #[must_use]
    pub fn first_attr(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|name| self.attr(name))
            .map(str::trim)
            .find(|value| !value.is_empty())
    }

    /// Iterate attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Immediate child elements in document order
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The first child element, i.e. the topmost element of a document root
    #[must_use]
    pub fn first_element(&self) -> Option<&Node> {
        self.children.first()
    }

    /// First immediate child with the given tag
    #[must_use]
    pub fn find_child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.is_tag(tag))
    }

    /// First descendant with the given tag, in document order
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&Node> {
        self.descendants().find(|node| node.is_tag(tag))
    }

    /// All descendants in document (pre-)order, excluding `self`
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Text held directly by this node, untrimmed
    #[must_use]
    pub fn own_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Concatenated text of this node and all descendants, trimmed
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        let mut segments = self.segments.iter().peekable();
        for (index, child) in self.children.iter().enumerate() {
            while let Some(segment) = segments.next_if(|s| s.before_child <= index) {
                out.push_str(&segment.text);
            }
            child.collect_text(out);
        }
        for segment in segments {
            out.push_str(&segment.text);
        }
    }
}

/// Pre-order iterator over a node's descendants
///
/// Uses an explicit stack so traversal depth never touches the call stack.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
