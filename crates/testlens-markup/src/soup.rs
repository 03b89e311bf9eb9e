// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Lenient tag-soup grammar
//!
//! A single forward scan that accepts any input. Anything that does not read
//! as markup is kept as text, unmatched end tags are dropped and unclosed
//! elements are closed at end of input.
//!
//! A tag that runs off the end of the input (no closing `>` or quote) ends
//! markup recognition: it and everything after it are kept as text. Every
//! byte is therefore examined a bounded number of times.

use std::borrow::Cow;

use crate::builder::TreeBuilder;
use crate::grammar::Grammar;
use crate::node::Node;

/// HTML elements that never have content
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is script/style source, not markup
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// The most permissive grammar; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct TagSoup;

impl Grammar for TagSoup {
    fn name(&self) -> &'static str {
        "tag-soup"
    }

    fn parse(&self, text: &str) -> Option<Node> {
        Some(scan(text))
    }
}

struct StartTag {
    node: Node,
    self_closing: bool,
    /// Byte offset just past the closing `>`
    end: usize,
}

/// A markup construct recognised at a `<`
enum Markup {
    /// Comment, declaration or processing instruction; resume at the offset
    Skip(usize),
    /// CDATA section: literal text in `start..end`, resume at `resume`
    Literal {
        start: usize,
        end: usize,
        resume: usize,
    },
    EndTag {
        name: String,
        end: usize,
    },
    StartTag(StartTag),
}

/// Why nothing could be read at a `<`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Miss {
    /// Not markup; the `<` is ordinary text
    Stray,
    /// A tag that the rest of the input never terminates
    Truncated,
}

fn scan(input: &str) -> Node {
    let mut builder = TreeBuilder::new();
    let mut pos = 0;
    let mut text_start = 0;

    while let Some(offset) = input[pos..].find('<') {
        let lt = pos + offset;
        let markup = match read_markup(input, lt) {
            Ok(markup) => markup,
            // A stray `<` stays part of the surrounding text
            Err(Miss::Stray) => {
                pos = lt + 1;
                continue;
            }
            Err(Miss::Truncated) => break,
        };

        flush_text(&mut builder, &input[text_start..lt]);
        let resume = match markup {
            Markup::Skip(end) => end,
            Markup::Literal { start, end, resume } => {
                builder.text(&input[start..end]);
                resume
            }
            Markup::EndTag { name, end } => {
                builder.close(&name);
                end
            }
            Markup::StartTag(tag) => place_start_tag(&mut builder, input, tag),
        };
        pos = resume;
        text_start = resume;
    }

    flush_text(&mut builder, &input[text_start..]);
    builder.finish()
}

fn read_markup(input: &str, lt: usize) -> Result<Markup, Miss> {
    let rest = &input[lt..];
    if let Some(body) = rest.strip_prefix("<!--") {
        return Ok(Markup::Skip(
            skip_past(body, "-->").map_or(input.len(), |n| lt + 4 + n),
        ));
    }
    if let Some(body) = rest.strip_prefix("<![CDATA[") {
        let start = lt + 9;
        return Ok(match body.find("]]>") {
            Some(n) => Markup::Literal {
                start,
                end: start + n,
                resume: start + n + 3,
            },
            None => Markup::Literal {
                start,
                end: input.len(),
                resume: input.len(),
            },
        });
    }
    if rest.starts_with("<!") || rest.starts_with("<?") {
        return Ok(Markup::Skip(
            skip_past(rest, ">").map_or(input.len(), |n| lt + n),
        ));
    }
    if rest.starts_with("</") {
        return read_end_tag(input, lt).map(|(name, end)| Markup::EndTag { name, end });
    }
    read_start_tag(input, lt).map(Markup::StartTag)
}

fn flush_text(builder: &mut TreeBuilder, raw: &str) {
    if !raw.is_empty() {
        builder.text(&decode_entities(raw));
    }
}

/// Place a start tag in the tree and return the offset to resume scanning at
fn place_start_tag(builder: &mut TreeBuilder, input: &str, tag: StartTag) -> usize {
    let name = tag.node.tag().to_string();
    if tag.self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
        builder.append(tag.node);
        return tag.end;
    }
    if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
        builder.append(tag.node);
        let closing = format!("</{name}");
        return match find_ignore_case(&input[tag.end..], &closing) {
            Some(n) => {
                let close_start = tag.end + n;
                skip_past(&input[close_start..], ">").map_or(input.len(), |m| close_start + m)
            }
            None => input.len(),
        };
    }
    builder.open(tag.node);
    tag.end
}

/// Offset just past the first `needle` in `haystack`
fn skip_past(haystack: &str, needle: &str) -> Option<usize> {
    haystack.find(needle).map(|n| n + needle.len())
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':' | b'.')
}

/// Drop any namespace prefix (`ns:testcase` -> `testcase`)
fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

fn read_name(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut end = start;
    while end < bytes.len() && is_name_char(bytes[end]) {
        end += 1;
    }
    end
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Read `</name ...>` starting at `lt`. Returns the name and the offset past `>`.
fn read_end_tag(input: &str, lt: usize) -> Result<(String, usize), Miss> {
    let name_start = lt + 2;
    let name_end = read_name(input, name_start);
    let close = input[name_end..].find('>').ok_or(Miss::Truncated)? + name_end;
    Ok((local_name(&input[name_start..name_end]).to_string(), close + 1))
}

/// Read `<name attr=value ...>` starting at `lt`
fn read_start_tag(input: &str, lt: usize) -> Result<StartTag, Miss> {
    let bytes = input.as_bytes();
    let name_start = lt + 1;
    if !bytes.get(name_start).copied().is_some_and(is_name_start) {
        return Err(Miss::Stray);
    }
    let name_end = read_name(input, name_start);
    let mut node = Node::new(local_name(&input[name_start..name_end]));
    let mut pos = name_end;

    loop {
        pos = skip_whitespace(bytes, pos);
        match bytes.get(pos).copied().ok_or(Miss::Truncated)? {
            b'>' => {
                return Ok(StartTag {
                    node,
                    self_closing: false,
                    end: pos + 1,
                });
            }
            b'/' if bytes.get(pos + 1) == Some(&b'>') => {
                return Ok(StartTag {
                    node,
                    self_closing: true,
                    end: pos + 2,
                });
            }
            b'/' | b'<' | b'"' | b'\'' | b'=' => pos += 1,
            _ => {
                let key_start = pos;
                while pos < bytes.len()
                    && !bytes[pos].is_ascii_whitespace()
                    && !matches!(bytes[pos], b'=' | b'>' | b'/' | b'<' | b'"' | b'\'')
                {
                    pos += 1;
                }
                let key = local_name(&input[key_start..pos]).to_string();
                pos = skip_whitespace(bytes, pos);
                let value = if bytes.get(pos) == Some(&b'=') {
                    pos = skip_whitespace(bytes, pos + 1);
                    let (value, next) = read_attr_value(input, pos)?;
                    pos = next;
                    value
                } else {
                    Cow::Borrowed("")
                };
                node.set_attr(&key, &value);
            }
        }
    }
}

fn read_attr_value(input: &str, pos: usize) -> Result<(Cow<'_, str>, usize), Miss> {
    let bytes = input.as_bytes();
    match bytes.get(pos).copied().ok_or(Miss::Truncated)? {
        quote @ (b'"' | b'\'') => {
            let quote = char::from(quote);
            let close = input[pos + 1..].find(quote).ok_or(Miss::Truncated)? + pos + 1;
            Ok((decode_entities(&input[pos + 1..close]), close + 1))
        }
        _ => {
            let mut end = pos;
            while end < bytes.len()
                && !bytes[end].is_ascii_whitespace()
                && bytes[end] != b'>'
                && !(bytes[end] == b'/' && bytes.get(end + 1) == Some(&b'>'))
            {
                end += 1;
            }
            Ok((decode_entities(&input[pos..end]), end))
        }
    }
}

/// Longest reference looked at, `&` through `;`
const MAX_ENTITY_LEN: usize = 11;

/// Decode the common named and numeric character references
#[must_use]
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.bytes().take(MAX_ENTITY_LEN).position(|b| b == b';') {
            Some(semi) => match resolve_entity(&tail[1..semi]) {
                Some(ch) => {
                    out.push(ch);
                    rest = &tail[semi + 1..];
                }
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            },
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
