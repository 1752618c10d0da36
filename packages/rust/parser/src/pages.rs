//! Page segmentation.

/// Literal token separating pages in a source document.
pub const PAGE_BREAK: &str = "PAGE BREAK";

/// Split a raw document into trimmed, non-empty pages in document order.
///
/// A document without any `PAGE BREAK` is a single page.
pub fn split_pages(text: &str) -> Vec<&str> {
    text.split(PAGE_BREAK)
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect()
}

/// Trimmed, non-empty lines of a page.
pub(crate) fn content_lines(page: &str) -> impl Iterator<Item = &str> {
    page.lines().map(str::trim).filter(|line| !line.is_empty())
}
