use serde::Serialize;

/// Pages shown on each side of the current one.
pub const PAGE_NEIGHBOURS: u32 = 2;
const WINDOW_SIZE: u32 = PAGE_NEIGHBOURS * 2 + 1;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

/// Page controls to render for `current` out of `total` pages.
///
/// The first and last pages are always present, with up to
/// [`PAGE_NEIGHBOURS`] pages on either side of `current` and an ellipsis for
/// each skipped range. Near either edge the window is pinned so that five
/// inner pages are still shown.
///
/// Callers must keep `1 <= current <= total`; other inputs produce a
/// sequence but it is not meaningful.
pub fn page_window(current: u32, total: u32) -> Vec<PageMarker> {
    if total <= WINDOW_SIZE + 2 {
        return (1..=total).map(PageMarker::Page).collect();
    }

    let mut markers = vec![PageMarker::Page(1)];

    let mut start = current.saturating_sub(PAGE_NEIGHBOURS).max(2);
    let mut end = (total - 1).min(current.saturating_add(PAGE_NEIGHBOURS));

    if current <= PAGE_NEIGHBOURS + 1 {
        start = 2;
        end = WINDOW_SIZE;
    }

    if current >= total - PAGE_NEIGHBOURS {
        start = total - WINDOW_SIZE + 1;
        end = total - 1;
    }

    if start > 2 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.extend((start..=end).map(PageMarker::Page));

    if end < total - 1 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.push(PageMarker::Page(total));
    markers
}

/// Everything a pagination control needs for one render.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total: u32,
    pub markers: Vec<PageMarker>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Pagination {
    pub fn new(current: u32, total: u32) -> Pagination {
        Pagination {
            current,
            total,
            markers: page_window(current, total),
            has_previous: current > 1,
            has_next: current < total,
        }
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous.then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next.then(|| self.current + 1)
    }
}
