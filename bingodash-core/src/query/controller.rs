use std::borrow::Cow;
use std::fmt;

use bingodash_contracts::prelude::FieldAccess;

use super::compare::sort_items;
use super::sort::{ColumnSpec, SortState};

/// Drives a table's sort in response to header clicks.
///
/// Two variants exist. [`SelfManagedSort`] owns its state and orders rows
/// locally. [`ExternallyDrivenSort`] only reports the desired next state and
/// leaves ordering to whoever owns the data, typically the backend.
pub trait SortController {
    fn columns(&self) -> &[ColumnSpec];

    /// The state the table should render with.
    fn state(&self) -> SortState;

    /// Handles a click on the header keyed `column`.
    ///
    /// Returns `false` when the column is unknown or not sortable, in which
    /// case nothing happens.
    fn click(&mut self, column: &str) -> bool;

    /// Rows in display order.
    fn rows<'a, T>(&self, data: &'a [T]) -> Cow<'a, [T]>
    where
        T: FieldAccess + Clone;

    fn is_sortable(&self, column: &str) -> bool {
        self.columns()
            .iter()
            .any(|spec| spec.key == column && spec.sortable)
    }
}

/// Sort controller that keeps its own state and sorts a copy of the rows.
#[derive(Debug, Clone)]
pub struct SelfManagedSort {
    columns: Vec<ColumnSpec>,
    state: SortState,
}

impl SelfManagedSort {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            state: SortState::Unsorted,
        }
    }

    pub fn with_state(mut self, state: SortState) -> Self {
        self.state = state;
        self
    }

    /// Drops back to insertion order, e.g. when the dataset is swapped out.
    pub fn reset(&mut self) {
        self.state = SortState::Unsorted;
    }
}

impl SortController for SelfManagedSort {
    fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    fn state(&self) -> SortState {
        self.state.clone()
    }

    fn click(&mut self, column: &str) -> bool {
        if !self.is_sortable(column) {
            return false;
        }
        self.state = self.state.next_for(column);
        true
    }

    fn rows<'a, T>(&self, data: &'a [T]) -> Cow<'a, [T]>
    where
        T: FieldAccess + Clone,
    {
        match (self.state.column(), self.state.direction()) {
            (Some(column), Some(direction)) => {
                let mut sorted = data.to_vec();
                sort_items(&mut sorted, column, direction);
                Cow::Owned(sorted)
            }
            _ => Cow::Borrowed(data),
        }
    }
}

/// Sort controller whose state lives with the caller.
///
/// Clicks compute the next state from the last state the caller pushed in
/// with [`ExternallyDrivenSort::sync`] and hand it to the callback. The
/// controller does not adopt the new state itself and never reorders rows.
pub struct ExternallyDrivenSort<F>
where
    F: FnMut(SortState),
{
    columns: Vec<ColumnSpec>,
    current: SortState,
    on_sort: F,
}

impl<F> ExternallyDrivenSort<F>
where
    F: FnMut(SortState),
{
    pub fn new(
        columns: Vec<ColumnSpec>,
        current: SortState,
        on_sort: F,
    ) -> Self {
        Self {
            columns,
            current,
            on_sort,
        }
    }

    /// Mirrors the caller-owned state back into the controller.
    pub fn sync(&mut self, state: SortState) {
        self.current = state;
    }
}

impl<F> fmt::Debug for ExternallyDrivenSort<F>
where
    F: FnMut(SortState),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternallyDrivenSort")
            .field("columns", &self.columns)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<F> SortController for ExternallyDrivenSort<F>
where
    F: FnMut(SortState),
{
    fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    fn state(&self) -> SortState {
        self.current.clone()
    }

    fn click(&mut self, column: &str) -> bool {
        if !self.is_sortable(column) {
            return false;
        }
        let next = self.current.next_for(column);
        (self.on_sort)(next);
        true
    }

    fn rows<'a, T>(&self, data: &'a [T]) -> Cow<'a, [T]>
    where
        T: FieldAccess + Clone,
    {
        Cow::Borrowed(data)
    }
}
