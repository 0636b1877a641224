use bingodash_model::WirePagination;
use serde::{Deserialize, Serialize};

/// Who slices a collection into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSource {
    /// The backend returns one page per request along with the totals.
    Server,
    /// The backend returns everything; pages are windows over the filtered
    /// local list.
    Client,
}

/// Pagination cursor for one table.
///
/// `current_page` is 1-based and is not clamped against `total_pages`;
/// callers that jump past the end simply see an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    current_page: u32,
    page_size: u32,
    total: u64,
    total_pages: u32,
}

impl PageState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total: 0,
            total_pages: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page;
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
        self.total_pages = Self::pages_for(self.total, self.page_size);
    }

    /// Records a locally known total and derives the page count from it.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        self.total_pages = Self::pages_for(total, self.page_size);
    }

    /// Adopts the totals a server-paginated response reported.
    ///
    /// The reported page number is ignored so that a response never moves
    /// the cursor the operator chose.
    pub fn apply_wire(&mut self, wire: &WirePagination) {
        if wire.page_size > 0 {
            self.page_size = wire.page_size;
        }
        self.total = wire.total;
        self.total_pages = if wire.total_pages > 0 || wire.total == 0 {
            wire.total_pages
        } else {
            Self::pages_for(wire.total, self.page_size)
        };
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Zero-based index of the first row on the current page.
    pub fn offset(&self) -> usize {
        let page = self.current_page.saturating_sub(1) as usize;
        page.saturating_mul(self.page_size as usize)
    }

    /// The current page's window over `items`.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start
            .saturating_add(self.page_size as usize)
            .min(items.len());
        &items[start..end]
    }

    /// `ceil(total / page_size)`; an empty collection has zero pages.
    pub fn pages_for(total: u64, page_size: u32) -> u32 {
        let size = u64::from(page_size.max(1));
        let pages = total.div_ceil(size);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_collection_has_no_pages() {
        let mut state = PageState::new(10);
        state.set_total(0);
        assert_eq!(state.total_pages(), 0);
        assert!(!state.has_next());
        assert!(!state.has_previous());
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut state = PageState::new(10);
        state.set_total(95);
        state.set_page(4);
        state.set_page_size(25);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 4);
    }

    #[test]
    fn set_page_is_not_clamped() {
        let mut state = PageState::new(10);
        state.set_total(5);
        state.set_page(9);
        assert_eq!(state.current_page(), 9);
        let items: Vec<u32> = (0..5).collect();
        assert!(state.window(&items).is_empty());
    }

    #[test]
    fn window_clips_the_last_page() {
        let mut state = PageState::new(10);
        let items: Vec<u32> = (0..23).collect();
        state.set_total(items.len() as u64);
        state.set_page(3);
        assert_eq!(state.window(&items), &[20, 21, 22]);
        assert!(!state.has_next());
        assert!(state.has_previous());
    }

    #[test]
    fn wire_totals_override_local_state() {
        let mut state = PageState::new(10);
        state.set_page(2);
        state.apply_wire(&WirePagination {
            total: 120,
            page: 7,
            page_size: 50,
            total_pages: 3,
        });
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.page_size(), 50);
        assert_eq!(state.total_pages(), 3);
        assert!(state.has_next());
    }

    proptest! {
        #[test]
        fn total_pages_is_ceiling_division(
            total in 0u64..100_000,
            size in 1u32..500,
        ) {
            let mut state = PageState::new(size);
            state.set_total(total);
            let expected = if total == 0 {
                0
            } else {
                (total + u64::from(size) - 1) / u64::from(size)
            };
            prop_assert_eq!(u64::from(state.total_pages()), expected);
        }

        #[test]
        fn windows_partition_the_collection(
            len in 0usize..300,
            size in 1u32..40,
        ) {
            let items: Vec<usize> = (0..len).collect();
            let mut state = PageState::new(size);
            state.set_total(len as u64);
            let mut seen = Vec::new();
            for page in 1..=state.total_pages() {
                state.set_page(page);
                seen.extend_from_slice(state.window(&items));
            }
            prop_assert_eq!(seen, items);
        }
    }
}
