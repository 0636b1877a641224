use bingodash_model::{CategoryFilter, DateRange, StatusFilter};

use crate::query::SortState;

/// Query for one page of a collection.
///
/// `F` carries the domain's extra filter (card category, challenge status);
/// collections without one use `()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest<F = ()> {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub sort: SortState,
    pub filter: F,
}

impl<F> ListRequest<F> {
    pub fn new(page: u32, page_size: u32, filter: F) -> Self {
        Self {
            page,
            page_size,
            search: None,
            sort: SortState::Unsorted,
            filter,
        }
    }

    /// Sets the search term; blank terms are dropped.
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }
}

pub type QueryPairs = Vec<(&'static str, String)>;

impl ListRequest<()> {
    /// `/api/user` query: `pageNumber`, `pageSize`, `sort`, `desc`, `search`.
    pub fn user_params(&self) -> QueryPairs {
        let mut pairs = vec![
            ("pageNumber", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let SortState::Ascending(column) | SortState::Descending(column) =
            &self.sort
        {
            pairs.push(("sort", column.clone()));
            let desc = matches!(self.sort, SortState::Descending(_));
            pairs.push(("desc", desc.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

impl ListRequest<CategoryFilter> {
    /// `/api/bingo-card` query. `category_id` is omitted for the `all`
    /// filter.
    pub fn card_params(&self) -> QueryPairs {
        let mut pairs = Vec::with_capacity(4);
        if let Some(id) = self.filter.category_id() {
            pairs.push(("category_id", id.to_string()));
        }
        pairs.push(("pageNumber", self.page.to_string()));
        pairs.push(("pageSize", self.page_size.to_string()));
        if let Some(search) = &self.search {
            pairs.push(("searchTerm", search.clone()));
        }
        pairs
    }
}

impl ListRequest<StatusFilter> {
    /// `/api/challenge/admin` query: `page`, `limit`, `status`, `search`.
    pub fn challenge_params(&self) -> QueryPairs {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.page_size.to_string()),
        ];
        if let Some(status) = self.filter.status() {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// `/api/payment/revenue/range` query with ISO dates.
pub fn range_params(range: &DateRange) -> QueryPairs {
    vec![
        ("startDate", range.start().format("%Y-%m-%d").to_string()),
        ("endDate", range.end().format("%Y-%m-%d").to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingodash_model::{ChallengeStatus, EntityId};

    #[test]
    fn user_params_carry_sort_and_search() {
        let request = ListRequest::new(2, 10, ())
            .with_search("  ada ")
            .with_sort(SortState::descending("email"));
        assert_eq!(
            request.user_params(),
            vec![
                ("pageNumber", "2".to_string()),
                ("pageSize", "10".to_string()),
                ("sort", "email".to_string()),
                ("desc", "true".to_string()),
                ("search", "ada".to_string()),
            ]
        );
    }

    #[test]
    fn unsorted_blank_search_sends_only_paging() {
        let request = ListRequest::new(1, 10, ()).with_search("   ");
        assert_eq!(request.user_params().len(), 2);
    }

    #[test]
    fn all_filters_are_omitted() {
        let cards = ListRequest::new(1, 50, CategoryFilter::All);
        assert!(cards.card_params().iter().all(|(k, _)| *k != "category_id"));

        let challenges = ListRequest::new(1, 10, StatusFilter::All);
        assert!(
            challenges
                .challenge_params()
                .iter()
                .all(|(k, _)| *k != "status")
        );
    }

    #[test]
    fn concrete_filters_are_sent() {
        let cards = ListRequest::new(
            1,
            50,
            CategoryFilter::Category(EntityId::from("cat-1")),
        );
        assert_eq!(cards.card_params()[0], ("category_id", "cat-1".into()));

        let challenges =
            ListRequest::new(3, 10, StatusFilter::Only(ChallengeStatus::Unpaid))
                .with_search("walk");
        assert_eq!(
            challenges.challenge_params(),
            vec![
                ("page", "3".to_string()),
                ("limit", "10".to_string()),
                ("status", "unpaid".to_string()),
                ("search", "walk".to_string()),
            ]
        );
    }
}
