//! Page strip helpers for list screens backed by server-side paging.

use std::collections::BTreeSet;

use serde::Serialize;

/// Pages kept at each end of the strip.
const EDGE_PAGES: usize = 2;
/// Pages shown before the current one.
const PAGES_BEFORE: usize = 2;
/// Pages shown after the current one.
const PAGES_AFTER: usize = 4;

/// Page numbers to show under a list, with `None` marking each gap.
///
/// Shows the first and last `EDGE_PAGES` pages plus a window around
/// `current_page`.
fn page_strip(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    let window = current_page.saturating_sub(PAGES_BEFORE).max(1)
        ..=current_page.saturating_add(PAGES_AFTER).min(total_pages);
    let tail = total_pages.saturating_sub(EDGE_PAGES).saturating_add(1)..=total_pages;

    let shown: BTreeSet<usize> = (1..=EDGE_PAGES.min(total_pages))
        .chain(window)
        .chain(tail)
        .collect();

    let mut strip = Vec::with_capacity(shown.len() + 2);
    let mut previous = 0;
    for page in shown {
        if page > previous + 1 {
            strip.push(None);
        }
        strip.push(Some(page));
        previous = page;
    }
    strip
}

/// One page of items together with its navigation strip.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// `current_page` is clamped to `1..=total_pages`.
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = current_page.min(total_pages).max(1);

        Self {
            items,
            pages: page_strip(total_pages, current_page),
            page: current_page,
            total_pages,
        }
    }
}
