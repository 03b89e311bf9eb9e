// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for tolerant markup parsing
//!
//! This fuzzes `parse_document`, which must accept any text and keep the
//! tree within the nesting cap.

#![no_main]

use libfuzzer_sys::fuzz_target;

use testlens_markup::{MAX_DEPTH, Node, parse_document};

fn depth(node: &Node) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(node, 0usize)];
    while let Some((current, level)) = stack.pop() {
        deepest = deepest.max(level);
        stack.extend(current.children().iter().map(|child| (child, level + 1)));
    }
    deepest
}

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed = parse_document(input);
        assert!(depth(&parsed.root) <= MAX_DEPTH + 1);
    }
});
