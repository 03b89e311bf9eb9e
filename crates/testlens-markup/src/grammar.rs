//! Grammar engines and their priority order

use crate::node::Node;
use crate::sniff::Flavor;
use crate::soup::TagSoup;
use crate::xml::{RecoveringXml, StrictXml};

/// A markup grammar able to lower text into a [`Node`] tree
pub trait Grammar: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Parse `text`, or return `None` if this grammar cannot make sense of it
    fn parse(&self, text: &str) -> Option<Node>;
}

static XML_CHAIN: [&dyn Grammar; 3] = [&StrictXml, &RecoveringXml, &TagSoup];
static HTML_CHAIN: [&dyn Grammar; 1] = [&TagSoup];

/// Grammars to try, in order, for a sniffed flavor
///
/// Every chain ends with [`TagSoup`], which accepts any input.
#[must_use]
pub fn chain_for(flavor: Flavor) -> &'static [&'static dyn Grammar] {
    match flavor {
        Flavor::Xml => &XML_CHAIN,
        Flavor::Html => &HTML_CHAIN,
    }
}
