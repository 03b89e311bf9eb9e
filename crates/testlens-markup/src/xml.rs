// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! XML-flavored grammars backed by `quick-xml`

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::debug;

use crate::builder::TreeBuilder;
use crate::grammar::Grammar;
use crate::node::Node;

/// Well-formed XML only; any defect rejects the whole document
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictXml;

/// XML reading that tolerates mismatched end tags and stops at the first
/// unreadable construct, keeping what it has
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveringXml;

impl Grammar for StrictXml {
    fn name(&self) -> &'static str {
        "strict-xml"
    }

    fn parse(&self, text: &str) -> Option<Node> {
        read_xml(text, true)
    }
}

impl Grammar for RecoveringXml {
    fn name(&self) -> &'static str {
        "recovering-xml"
    }

    fn parse(&self, text: &str) -> Option<Node> {
        read_xml(text, false)
    }
}

fn read_xml(text: &str, strict: bool) -> Option<Node> {
    let mut reader = Reader::from_str(text);
    {
        let config = reader.config_mut();
        config.check_end_names = strict;
        config.trim_text(false);
    }

    let mut builder = TreeBuilder::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => builder.open(element(&start, strict)?),
            Ok(Event::Empty(start)) => builder.append(element(&start, strict)?),
            Ok(Event::End(end)) => {
                let local = end.local_name();
                let name = decode(local.as_ref());
                if !builder.close(&name) && strict {
                    return None;
                }
            }
            Ok(Event::Text(content)) => match content.unescape() {
                Ok(decoded) => builder.text(&decoded),
                Err(err) if strict => {
                    debug!(error = %err, "strict XML rejected text content");
                    return None;
                }
                Err(_) => builder.text(&decode(&content)),
            },
            Ok(Event::CData(content)) => builder.text(&decode(&content.into_inner())),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                debug!(
                    error = %err,
                    position = reader.buffer_position(),
                    strict,
                    "XML reader stopped"
                );
                if strict {
                    return None;
                }
                break;
            }
        }
    }

    if builder.element_count() == 0 || (strict && builder.open_depth() > 0) {
        return None;
    }
    Some(builder.finish())
}

/// Convert a start tag into a node. Returns `None` only in strict mode, when
/// an attribute is malformed.
fn element(start: &BytesStart<'_>, strict: bool) -> Option<Node> {
    let local = start.local_name();
    let mut node = Node::new(&decode(local.as_ref()));
    for attribute in start.attributes().with_checks(strict) {
        let attribute = match attribute {
            Ok(attribute) => attribute,
            Err(_) if strict => return None,
            Err(_) => break,
        };
        let key = attribute.key.local_name();
        let key = decode(key.as_ref());
        let value = match attribute.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) if strict => return None,
            Err(_) => decode(&attribute.value).into_owned(),
        };
        node.set_attr(&key, &value);
    }
    Some(node)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
