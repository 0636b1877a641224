//! Pure collection-view machinery: comparison, the tri-state sort machine,
//! pagination arithmetic and search filtering.

pub mod compare;
pub mod controller;
pub mod pagination;
pub mod search;
pub mod sort;

pub use compare::{compare_values, locale_compare, sort_items};
pub use controller::{ExternallyDrivenSort, SelfManagedSort, SortController};
pub use pagination::{PageSource, PageState};
pub use search::{SearchTerm, filter_items};
pub use sort::{ColumnSpec, SortDirection, SortState};
