// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testlens-markup: Tolerant markup parsing for testlens
//!
//! This library crate turns arbitrary report text (JUnit/NUnit/TRX XML, HTML
//! reports, or something that merely looks like markup) into a generic
//! [`Node`] tree. Parsing never fails: malformed input degrades to a smaller
//! tree, and input with no markup at all becomes a bare document root.
//!
//! # Example
//!
//! ```
//! use testlens_markup::parse;
//!
//! let root = parse(r#"<testsuite><testcase name="a"/></testsuite>"#);
//! let case = root.find("testcase").expect("testcase");
//! assert_eq!(case.attr("name"), Some("a"));
//! ```

#![warn(missing_docs)]

mod builder;
pub mod grammar;
pub mod node;
pub mod sniff;
pub mod soup;
pub mod xml;

use tracing::debug;

pub use builder::MAX_DEPTH;
pub use grammar::{Grammar, chain_for};
pub use node::{DOCUMENT_TAG, Descendants, Node};
pub use sniff::{Flavor, sniff};

/// A parsed document along with how it was read
#[derive(Debug, Clone)]
pub struct Parsed {
    /// Synthetic document root owning the tree
    pub root: Node,
    /// Flavor sniffed from the document prefix
    pub flavor: Flavor,
    /// Name of the grammar that produced the tree
    pub grammar: &'static str,
}

/// Parse text into a document tree, reporting which grammar succeeded
#[must_use]
pub fn parse_document(text: &str) -> Parsed {
    let flavor = sniff(text);
    for grammar in chain_for(flavor) {
        match grammar.parse(text) {
            Some(root) => {
                debug!(grammar = grammar.name(), ?flavor, "parsed document");
                return Parsed {
                    root,
                    flavor,
                    grammar: grammar.name(),
                };
            }
            None => debug!(grammar = grammar.name(), ?flavor, "grammar rejected document"),
        }
    }
    Parsed {
        root: Node::text_leaf(text),
        flavor,
        grammar: "text",
    }
}

/// Parse text into a document tree. Never fails.
#[must_use]
pub fn parse(text: &str) -> Node {
    parse_document(text).root
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::node::Node;
    pub use crate::sniff::Flavor;
    pub use crate::{Parsed, parse, parse_document};
}
