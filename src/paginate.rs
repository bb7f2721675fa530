//! Splitting listings into pages and summarizing page links.
//!
//! Listings are cut into pages of [`PAGE_SIZE`] items. Each page of a listing
//! shows links to the other pages; with many pages only a window around the
//! selected page is shown, plus links to the first and last page:
//!
//! ```text
//! 15 pages, page index 7 selected:
//!   [1]  [5 6 7 (8) 9 10 11]  [15]
//! ```

use crate::types::{Pagination, SiteLink, SiteUrl};
use std::ops::RangeInclusive;

/// Items per listing page.
pub const PAGE_SIZE: usize = 5;

/// Up to this many pages, every page is linked.
const FULL_WINDOW_LIMIT: usize = 10;

/// Split `items` into consecutive pages of `size`. The last page holds the
/// remainder; an empty input still yields one empty page.
pub fn paginate<T>(items: &[T], size: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return vec![items];
    }
    items.chunks(size.max(1)).collect()
}

/// Which page indices a pagination summary links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Separate link to the first page, when the window does not start there.
    pub leading: Option<usize>,
    pub window: RangeInclusive<usize>,
    /// Separate link to the last page, when the window does not end there.
    pub trailing: Option<usize>,
}

/// Compute the linked page indices for `count` pages with `selected` current.
/// `None` when there is only one page.
///
/// Up to ten pages all are in the window. Beyond that the window is the
/// first nine pages while `selected < 5`, the last nine pages when
/// `selected` is within five of the end, and `selected ± 3` otherwise.
pub fn page_window(selected: usize, count: usize) -> Option<PageWindow> {
    if count <= 1 {
        return None;
    }
    let last = count - 1;
    let (start, end) = if count <= FULL_WINDOW_LIMIT {
        (0, last)
    } else if selected < 5 {
        (0, 8)
    } else if selected + 6 > count {
        (count - 9, last)
    } else {
        (selected - 3, selected + 3)
    };

    Some(PageWindow {
        leading: (start != 0).then_some(0),
        window: start..=end,
        trailing: (end != last).then_some(last),
    })
}

/// Build the page links for page `selected` of `count`, using `link` to
/// produce the URL of each page index.
pub fn pagination(selected: usize, count: usize, link: impl Fn(usize) -> SiteUrl) -> Pagination {
    let Some(window) = page_window(selected, count) else {
        return Pagination::none();
    };
    let page_link = |idx: usize| SiteLink::new((idx + 1).to_string(), link(idx));

    let mut groups = Vec::new();
    if let Some(first) = window.leading {
        groups.push(vec![page_link(first)]);
    }
    groups.push(
        window
            .window
            .map(|idx| page_link(idx).current(idx == selected))
            .collect(),
    );
    if let Some(last) = window.trailing {
        groups.push(vec![page_link(last).current(last == selected)]);
    }
    Pagination { groups }
}
