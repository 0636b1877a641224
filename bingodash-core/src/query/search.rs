use bingodash_contracts::prelude::Searchable;

/// A normalized free-text search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.is_empty() || item.matches_search(&self.needle)
    }
}

/// Keeps the items matching `term`, preserving order. An empty term keeps
/// everything.
pub fn filter_items<T>(items: &[T], term: &SearchTerm) -> Vec<T>
where
    T: Searchable + Clone,
{
    items
        .iter()
        .filter(|item| term.matches(*item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingodash_contracts::search::contains_folded;

    #[derive(Debug, Clone, PartialEq)]
    struct Code(&'static str);

    impl Searchable for Code {
        fn matches_search(&self, needle: &str) -> bool {
            contains_folded(self.0, needle)
        }
    }

    #[test]
    fn term_is_trimmed_and_folded() {
        let items = [Code("SPRING24"), Code("summer"), Code("Spring-Flash")];
        let hits = filter_items(&items, &SearchTerm::new("  spring "));
        assert_eq!(hits, [Code("SPRING24"), Code("Spring-Flash")]);
    }

    #[test]
    fn blank_term_keeps_everything() {
        let items = [Code("a"), Code("b")];
        assert_eq!(filter_items(&items, &SearchTerm::new("   ")).len(), 2);
    }
}
