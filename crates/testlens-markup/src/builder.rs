// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Stack-based tree assembly shared by every grammar

use crate::node::Node;

/// Maximum element nesting kept in a parsed tree
///
/// Elements opened beyond this depth are attached as siblings at the cap.
pub const MAX_DEPTH: usize = 256;

/// Incrementally assembles a [`Node`] tree from open/close/text events
pub(crate) struct TreeBuilder {
    /// Open elements; index 0 is always the document root
    stack: Vec<Node>,
    elements: usize,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            stack: vec![Node::document()],
            elements: 0,
        }
    }

    /// Open a new element that subsequent content nests under
    pub(crate) fn open(&mut self, node: Node) {
        if self.stack.len() > MAX_DEPTH {
            self.pop_innermost();
        }
        self.elements += 1;
        self.stack.push(node);
    }

    /// Append a complete element (self-closing or void)
    pub(crate) fn append(&mut self, node: Node) {
        self.elements += 1;
        self.top().push_child(node);
    }

    /// Append text to the innermost open element
    pub(crate) fn text(&mut self, text: &str) {
        self.top().push_text(text);
    }

    /// Close the nearest open element named `tag`, along with anything left
    /// open inside it. Returns `false` when no such element is open.
    pub(crate) fn close(&mut self, tag: &str) -> bool {
        let Some(position) = self
            .stack
            .iter()
            .rposition(|node| !node.is_document() && node.is_tag(tag))
        else {
            return false;
        };
        while self.stack.len() > position {
            self.pop_innermost();
        }
        true
    }

    /// Number of elements still open (excluding the document root)
    pub(crate) fn open_depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Total elements seen so far
    pub(crate) fn element_count(&self) -> usize {
        self.elements
    }

    /// Close everything and return the document root
    pub(crate) fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.pop_innermost();
        }
        self.stack.pop().unwrap_or_else(Node::document)
    }

    fn pop_innermost(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(node) = self.stack.pop() {
            self.top().push_child(node);
        }
    }

    fn top(&mut self) -> &mut Node {
        if self.stack.is_empty() {
            self.stack.push(Node::document());
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}
