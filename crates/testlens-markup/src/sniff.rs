//! Markup flavor detection

/// Number of leading characters inspected when sniffing
pub const SNIFF_WINDOW: usize = 400;

/// Root tags that mark a document as an XML test report
const REPORT_ROOT_HINTS: &[&str] = &[
    "<testsuites",
    "<testsuite",
    "<testcase",
    "<test-run",
    "<test-results",
    "<testrun",
    "<assemblies",
    "<unittest",
];

/// Grammar family preferred for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Strict, XML-flavored markup
    Xml,
    /// Lenient, HTML-flavored markup
    Html,
}

/// Guess the flavor from the start of the document
#[must_use]
pub fn sniff(text: &str) -> Flavor {
    let prefix: String = text
        .trim_start()
        .chars()
        .take(SNIFF_WINDOW)
        .collect::<String>()
        .to_lowercase();

    if prefix.starts_with("<?xml") || REPORT_ROOT_HINTS.iter().any(|hint| prefix.contains(hint)) {
        Flavor::Xml
    } else {
        Flavor::Html
    }
}
