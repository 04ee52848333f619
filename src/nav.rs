//! Navigation link highlighting
//!
//! Marks the nav link whose `href` equals the current page path. Exact
//! match only; under normal routing zero or one link matches.

/// Whether a nav link targets the current page
pub fn is_active(href: &str, current_path: &str) -> bool {
    href == current_path
}

/// The first href matching the current path, if any
pub fn active_href<'a>(
    hrefs: impl IntoIterator<Item = &'a str>,
    current_path: &str,
) -> Option<&'a str> {
    hrefs.into_iter().find(|href| is_active(href, current_path))
}
