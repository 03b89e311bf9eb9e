// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for testlens-extract

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a report
///
/// Malformed markup is never an error: it degrades to a smaller tree and,
/// at worst, to an empty record list.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input path does not exist
    #[error("Input not found: {}", path.display())]
    InputNotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// Error reading the input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding an exported record list
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
