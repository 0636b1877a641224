/// Free-text matching used by client-side filtering.
pub trait Searchable {
    /// `needle` is already trimmed and lowercased by the caller; an empty
    /// needle never reaches this method.
    fn matches_search(&self, needle: &str) -> bool;
}

/// Case-insensitive substring test shared by the `Searchable` impls.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
