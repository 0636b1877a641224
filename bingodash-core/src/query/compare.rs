use std::cmp::Ordering;

use bingodash_contracts::prelude::{FieldAccess, FieldValue};

use super::sort::SortDirection;

/// Case-insensitive ordering approximating a locale collation.
///
/// Strings are compared on their lowercase form first. When they differ only
/// in case, the lowercase spelling sorts first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Orders two cell values for a column sort.
///
/// Nulls go last regardless of `direction`. Two texts use
/// [`locale_compare`], two numbers compare arithmetically, and any other
/// pairing falls back to comparing their rendered strings. Descending
/// reverses the non-null result.
pub fn compare_values(
    a: &FieldValue<'_>,
    b: &FieldValue<'_>,
    direction: SortDirection,
) -> Ordering {
    let ordering = match (a, b) {
        (FieldValue::Null, FieldValue::Null) => return Ordering::Equal,
        (FieldValue::Null, _) => return Ordering::Greater,
        (_, FieldValue::Null) => return Ordering::Less,
        (FieldValue::Text(a), FieldValue::Text(b)) => locale_compare(a, b),
        (FieldValue::Number(a), FieldValue::Number(b)) => {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        }
        (a, b) => locale_compare(&a.render(), &b.render()),
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable in-place sort of `items` by `column`.
pub fn sort_items<T: FieldAccess>(
    items: &mut [T],
    column: &str,
    direction: SortDirection,
) {
    items.sort_by(|a, b| {
        compare_values(&a.field(column), &b.field(column), direction)
    });
}
