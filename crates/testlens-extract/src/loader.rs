// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Document loading
//!
//! Reading is the only fallible step of extraction: once text is in hand,
//! parsing and the cascade always produce a (possibly empty) record list.

use std::io::ErrorKind;
use std::path::Path;

use testlens_markup::parse_document;
use tracing::{debug, info};

use crate::cascade::Cascade;
use crate::error::ExtractError;
use crate::record::TestRecord;

/// Read a report as text
///
/// Invalid UTF-8 sequences are replaced rather than rejected and a leading
/// byte-order mark is dropped.
///
/// # Errors
///
/// Returns `ExtractError::InputNotFound` if the path does not exist, or
/// `ExtractError::Io` if it cannot be read.
pub fn load_document(path: impl AsRef<Path>) -> Result<String, ExtractError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ExtractError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => ExtractError::Io(err),
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded document");

    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
}

/// Extract records from report text with the given cascade
#[must_use]
pub fn extract_text(text: &str, cascade: &Cascade) -> Vec<TestRecord> {
    let parsed = parse_document(text);
    debug!(grammar = parsed.grammar, flavor = ?parsed.flavor, "document parsed");
    cascade.extract(&parsed.root)
}

/// Load a report from disk and extract its records with the default cascade
///
/// # Errors
///
/// Returns `ExtractError::InputNotFound` if the path does not exist, or
/// `ExtractError::Io` if it cannot be read. An unreadable *format* is not an
/// error; it yields an empty list.
pub fn parse_report(path: impl AsRef<Path>) -> Result<Vec<TestRecord>, ExtractError> {
    parse_report_with(path, &Cascade::default())
}

/// Load a report from disk and extract its records with a custom cascade
///
/// # Errors
///
/// See [`parse_report`].
pub fn parse_report_with(
    path: impl AsRef<Path>,
    cascade: &Cascade,
) -> Result<Vec<TestRecord>, ExtractError> {
    let path = path.as_ref();
    let text = load_document(path)?;
    let records = extract_text(&text, cascade);
    info!(path = %path.display(), records = records.len(), "extracted test records");
    Ok(records)
}

/// Load a record list previously exported as JSON
///
/// # Errors
///
/// Returns `ExtractError::InputNotFound`/`ExtractError::Io` for read failures
/// and `ExtractError::JsonParse` if the content is not a record list.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<TestRecord>, ExtractError> {
    let text = load_document(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Load a run from either a report document or a JSON record export,
/// chosen by the `.json` extension
///
/// # Errors
///
/// See [`parse_report`] and [`load_records`].
pub fn load_run(path: impl AsRef<Path>) -> Result<Vec<TestRecord>, ExtractError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        load_records(path)
    } else {
        parse_report(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Status;
    use similar_asserts::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(content).expect("write temp file");
        file
    }

    #[test]
    fn test_missing_input_is_reported() {
        let result = parse_report("/nonexistent/path/report-12345.xml");
        assert!(matches!(result, Err(ExtractError::InputNotFound { .. })));
    }

    #[test]
    fn test_bom_and_invalid_utf8_are_tolerated() {
        let mut content = b"\xEF\xBB\xBF<testsuite><testcase name=\"a\"/>".to_vec();
        content.extend_from_slice(b"<testcase name=\"b\xFF\"/></testsuite>");
        let file = temp_file(".xml", &content);
        let text = load_document(file.path()).expect("load");
        assert!(text.starts_with("<testsuite>"));
        let records = parse_report(file.path()).expect("parse");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_unreadable_format_is_empty_not_error() {
        let file = temp_file(".xml", b"");
        let records = parse_report(file.path()).expect("parse");
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_run_dispatches_on_extension() {
        let json = temp_file(".json", br#"[{"testcase":"t","classname":"c","status":"failed"}]"#);
        let records = load_run(json.path()).expect("json run");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, Status::Fail);

        let xml = temp_file(".xml", br#"<testsuite><testcase name="t"/></testsuite>"#);
        let records = load_run(xml.path()).expect("xml run");
        assert_eq!(records[0].status, Status::Pass);
    }

    #[test]
    fn test_bad_json_export_is_an_error() {
        let json = temp_file(".json", b"{not json");
        assert!(matches!(load_records(json.path()), Err(ExtractError::JsonParse(_))));
    }
}
