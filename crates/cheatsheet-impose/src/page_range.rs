//! Page-range expressions
//!
//! Grammar: comma-separated tokens, each a page number (`5`) or an
//! inclusive range (`3-7`). Parsing is lenient: tokens that are not
//! numbers, point outside the document, or run backwards contribute
//! nothing. An empty expression selects every page.

use std::collections::BTreeSet;

/// Resolve a page-range expression against a document with `page_count`
/// pages.
///
/// Returns 1-based page numbers, deduplicated and ascending regardless of
/// the order the tokens were written in.
pub fn parse_page_range(expr: &str, page_count: usize) -> Vec<usize> {
    if expr.trim().is_empty() {
        return (1..=page_count).collect();
    }

    let mut pages = BTreeSet::new();

    for token in expr.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        match parse_token(token, page_count) {
            Some((start, end)) => pages.extend(start..=end),
            None => log::debug!("Dropping page-range token {:?}", token),
        }
    }

    pages.into_iter().collect()
}

/// Parse one token into an inclusive, clamped `(start, end)` pair.
fn parse_token(token: &str, page_count: usize) -> Option<(usize, usize)> {
    if let Some((start, end)) = token.split_once('-') {
        // Range: "3-7"
        let start: usize = start.trim().parse().ok()?;
        let end: usize = end.trim().parse().ok()?;

        let start = start.max(1);
        let end = end.min(page_count);
        (start <= end).then_some((start, end))
    } else {
        // Single page: "5"
        let page: usize = token.parse().ok()?;
        (1..=page_count).contains(&page).then_some((page, page))
    }
}
