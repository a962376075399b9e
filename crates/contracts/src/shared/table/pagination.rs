use std::ops::Range;

/// Допустимые размеры страницы.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Ближайший допустимый размер страницы; при равном расстоянии берётся меньший.
pub fn normalize_page_size(page_size: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .copied()
        .min_by_key(|option| option.abs_diff(page_size))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Client-side pagination state. `current` is 1-based.
///
/// `total` follows the active row source and is only reseeded when that
/// source changes; filtering does not touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PaginationState {
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }

    /// Новый источник строк: сбрасываем на первую страницу.
    pub fn reseed(&mut self, total: usize) {
        self.total = total;
        self.current = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.current = page.max(1);
    }

    /// Меняет размер страницы, сохраняя первую видимую строку на экране.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 || page_size == self.page_size {
            return;
        }
        let first_visible = (self.current - 1) * self.page_size;
        self.page_size = page_size;
        self.current = first_visible / page_size + 1;
    }

    /// Number of pages needed for `count` rows (at least one).
    pub fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Current page clamped into `1..=page_count(count)`.
    pub fn effective_page(&self, count: usize) -> usize {
        self.current.clamp(1, self.page_count(count))
    }

    pub fn page_range(&self, count: usize) -> Range<usize> {
        let start = (self.effective_page(count) - 1) * self.page_size;
        let end = (start + self.page_size).min(count);
        start.min(count)..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.page_range(items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = PaginationState::new(42);
        assert_eq!(p.current, 1);
        assert_eq!(p.page_size, 10);
        assert_eq!(p.total, 42);
        assert_eq!(p.page_count(42), 5);
        assert_eq!(p.page_count(0), 1);
    }

    #[test]
    fn test_slice_and_clamp() {
        let items: Vec<usize> = (0..25).collect();
        let mut p = PaginationState::new(items.len());
        p.set_page(3);
        assert_eq!(p.slice(&items), &[20, 21, 22, 23, 24]);

        // Filtering shrank the set: the page clamps to the last one.
        let filtered = &items[..12];
        assert_eq!(p.effective_page(filtered.len()), 2);
        assert_eq!(p.slice(filtered), &[10, 11]);

        let empty: [usize; 0] = [];
        assert!(p.slice(&empty).is_empty());
    }

    #[test]
    fn test_page_size_change_keeps_first_visible_row() {
        let mut p = PaginationState::new(200);
        p.set_page(5); // rows 40..50
        p.set_page_size(20);
        assert_eq!(p.current, 3); // rows 40..60
        p.set_page_size(100);
        assert_eq!(p.current, 1);
        p.set_page_size(0);
        assert_eq!(p.page_size, 100);
    }

    #[test]
    fn test_reseed_resets_page() {
        let mut p = PaginationState::new(100).with_page_size(20);
        p.set_page(4);
        p.reseed(7);
        assert_eq!(p.current, 1);
        assert_eq!(p.total, 7);
        assert_eq!(p.page_size, 20);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let mut p = PaginationState::new(30);
        p.set_page(0);
        assert_eq!(p.current, 1);
    }

    #[test]
    fn test_normalize_page_size() {
        assert_eq!(normalize_page_size(10), 10);
        assert_eq!(normalize_page_size(50), 50);
        assert_eq!(normalize_page_size(15), 10);
        assert_eq!(normalize_page_size(18), 20);
        assert_eq!(normalize_page_size(0), 10);
        assert_eq!(normalize_page_size(1000), 100);
    }
}
