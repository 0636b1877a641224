use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Short form used on the wire and in table headers.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Current sort of a table.
///
/// A column is present exactly when a direction is, so the enum makes the
/// half-set states unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "direction", content = "column", rename_all = "lowercase")]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending(String),
    Descending(String),
}

impl SortState {
    pub fn ascending(column: impl Into<String>) -> Self {
        SortState::Ascending(column.into())
    }

    pub fn descending(column: impl Into<String>) -> Self {
        SortState::Descending(column.into())
    }

    /// Builds a state from loose parts. A missing half collapses to
    /// [`SortState::Unsorted`].
    pub fn from_parts(
        column: Option<String>,
        direction: Option<SortDirection>,
    ) -> Self {
        match (column, direction) {
            (Some(column), Some(SortDirection::Ascending)) => {
                SortState::Ascending(column)
            }
            (Some(column), Some(SortDirection::Descending)) => {
                SortState::Descending(column)
            }
            _ => SortState::Unsorted,
        }
    }

    pub fn column(&self) -> Option<&str> {
        match self {
            SortState::Unsorted => None,
            SortState::Ascending(column) | SortState::Descending(column) => {
                Some(column)
            }
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortState::Unsorted => None,
            SortState::Ascending(_) => Some(SortDirection::Ascending),
            SortState::Descending(_) => Some(SortDirection::Descending),
        }
    }

    pub fn is_sorted(&self) -> bool {
        !matches!(self, SortState::Unsorted)
    }

    /// State after a header click on `column`.
    ///
    /// The same column cycles ascending, descending, unsorted. A different
    /// column always starts over at ascending.
    pub fn next_for(&self, column: &str) -> SortState {
        match self {
            SortState::Ascending(current) if current == column => {
                SortState::Descending(current.clone())
            }
            SortState::Descending(current) if current == column => {
                SortState::Unsorted
            }
            _ => SortState::Ascending(column.to_string()),
        }
    }

    /// Applies `clicks` consecutive clicks on `column`.
    pub fn after_clicks(&self, column: &str, clicks: usize) -> SortState {
        (0..clicks).fold(self.clone(), |state, _| state.next_for(column))
    }
}

/// Header definition for a collection table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub sortable: bool,
}

impl ColumnSpec {
    pub fn sortable(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
        }
    }

    pub fn fixed(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
        }
    }
}
