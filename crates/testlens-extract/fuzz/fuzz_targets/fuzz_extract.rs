// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the full extraction pipeline
//!
//! This fuzzes `extract_text`, which parses arbitrary text and runs the
//! fallback cascade over the resulting tree.

#![no_main]

use libfuzzer_sys::fuzz_target;

use testlens_extract::{Cascade, DEFAULT_FLATTEN_CAP, extract_text};

fuzz_target!(|data: &[u8]| {
    // Reports are decoded lossily before extraction
    let input = String::from_utf8_lossy(data);
    let records = extract_text(&input, &Cascade::default());

    // Structural tiers are capped; candidate tiers are bounded by the input
    assert!(records.len() <= DEFAULT_FLATTEN_CAP.max(input.len()));
});
