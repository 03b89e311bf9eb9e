//! Failure category summaries

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use testlens_extract::TestRecord;

use crate::categorize::OTHER_CATEGORY;

/// Number of failures in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category label
    pub category: String,
    /// Failures carrying it
    pub count: usize,
}

/// Count categorized failures per category
///
/// Records without a category are counted under [`OTHER_CATEGORY`]. The
/// result is sorted by count, largest first, then by label.
#[must_use]
pub fn summarize_categories(failures: &[TestRecord]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in failures {
        let category = record.category.as_deref().unwrap_or(OTHER_CATEGORY);
        *counts.entry(category).or_default() += 1;
    }

    let mut summary: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    summary.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    summary
}
