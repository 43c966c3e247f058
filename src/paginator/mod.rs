use std::fmt;

use serde::{Serialize, Serializer};

use crate::results::{Category, SearchResult};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound on interactive page controls before the sequence collapses
/// into ellipses.
pub const MAX_VISIBLE_PAGES: usize = 10;

/// One entry in the page-number bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

impl PageLink {
    pub fn number(self) -> Option<usize> {
        match self {
            PageLink::Number(n) => Some(n),
            PageLink::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLink::Number(n) => write!(f, "{n}"),
            PageLink::Ellipsis => f.write_str("..."),
        }
    }
}

// numbers stay numbers and the ellipsis becomes "...", so the JSON reads
// like the page bar.
impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLink::Number(n) => serializer.serialize_u64(*n as u64),
            PageLink::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub visible: &'a [T],
    pub total_pages: usize,
}

pub fn filter_by_category<'a>(
    all: &'a [SearchResult],
    category: &Category,
) -> Vec<&'a SearchResult> {
    match category.platform() {
        Some(platform) => all.iter().filter(|r| r.platform == platform).collect(),
        None => all.iter().collect(),
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slices out the window for `current_page` (1-based). Pages past the end
/// yield an empty window; page 0 is read as page 1.
pub fn paginate<T>(filtered: &[T], current_page: usize, page_size: usize) -> Page<'_, T> {
    let total_pages = total_pages(filtered.len(), page_size);
    let page = current_page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(filtered.len());
    let end = start.saturating_add(page_size).min(filtered.len());
    Page {
        visible: &filtered[start..end],
        total_pages,
    }
}

pub fn compute_page_number_sequence(current_page: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageLink::Number).collect();
    }

    let mut pages = vec![PageLink::Number(1)];
    if current_page <= 4 {
        pages.extend((2..=5).map(PageLink::Number));
        pages.push(PageLink::Ellipsis);
        pages.push(PageLink::Number(total_pages));
    } else if current_page >= total_pages - 3 {
        pages.push(PageLink::Ellipsis);
        pages.extend((total_pages - 4..=total_pages).map(PageLink::Number));
    } else {
        pages.push(PageLink::Ellipsis);
        pages.extend((current_page - 1..=current_page + 1).map(PageLink::Number));
        pages.push(PageLink::Ellipsis);
        pages.push(PageLink::Number(total_pages));
    }
    pages
}
