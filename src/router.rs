/// Section id named by a fragment-style href (`#about`), if any.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.trim()
        .strip_prefix('#')
        .filter(|id| !id.is_empty())
}

/// Scroll position that lands a section just below the fixed header.
pub fn scroll_target(section_top: f64, header_height: f64) -> f64 {
    section_top - header_height
}

pub const TOP_OF_PAGE: f64 = 0.0;
