use yatube_types::api::FeedPage;
use yatube_types::models::Post;

/// Posts per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of an ordered sequence. `number` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// 1-based position of the first and last item on this page, or `None`
    /// for an empty page.
    pub fn item_range(&self, page_size: usize) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let start = (self.number - 1) * page_size + 1;
        Some((start, start + self.items.len() - 1))
    }
}

/// Slice `items` into page `page_number` of `page_size` items.
///
/// A page past the end is an empty page that still reports the real
/// `total_pages`; it is never clamped to the last page.
pub fn paginate<T>(items: Vec<T>, page_number: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let number = page_number.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (number - 1).saturating_mul(page_size);
    let items = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        number,
        total_items,
        total_pages,
    }
}

/// Read a `?page=` value. Missing, non-numeric and zero values mean page 1.
pub fn parse_page_number(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

impl From<Page<Post>> for FeedPage {
    fn from(page: Page<Post>) -> Self {
        Self {
            number: page.number,
            total_pages: page.total_pages,
            total_items: page.total_items,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            posts: page.items,
        }
    }
}
