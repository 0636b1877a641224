use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bingodash_contracts::prelude::{CollectionItem, Keyed};
use bingodash_model::{EntityId, Page};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::backend::CollectionBackend;
use crate::api::ListRequest;
use crate::debounce::Debouncer;
use crate::error::ApiResult;
use crate::query::{
    PageSource, PageState, SearchTerm, SortState, filter_items, sort_items,
};

/// Mutable view state behind a [`CollectionStore`].
#[derive(Debug, Clone)]
pub struct CollectionState<T, F> {
    items: Vec<T>,
    page: PageState,
    search_term: String,
    sort: SortState,
    filter: F,
    loading: bool,
    error: Option<String>,
}

impl<T, F> CollectionState<T, F>
where
    T: CollectionItem,
    F: Clone + Default,
{
    fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: PageState::new(page_size),
            search_term: String::new(),
            sort: SortState::Unsorted,
            filter: F::default(),
            loading: false,
            error: None,
        }
    }

    fn request(&self) -> ListRequest<F> {
        ListRequest::new(
            self.page.current_page(),
            self.page.page_size(),
            self.filter.clone(),
        )
        .with_search(&self.search_term)
        .with_sort(self.sort.clone())
    }

    fn accept(&mut self, page: Page<T>, source: PageSource) {
        self.items = page.items;
        match (source, page.pagination) {
            (PageSource::Server, Some(wire)) => self.page.apply_wire(&wire),
            _ => self.page.set_total(self.items.len() as u64),
        }
    }

    /// Search-filtered and sorted full list; client-paginated views page
    /// over this.
    fn filtered(&self) -> Vec<T> {
        let term = SearchTerm::new(&self.search_term);
        let mut rows = filter_items(&self.items, &term);
        if let (Some(column), Some(direction)) =
            (self.sort.column(), self.sort.direction())
        {
            sort_items(&mut rows, column, direction);
        }
        rows
    }

    fn view(&self, source: PageSource) -> (Vec<T>, PageState) {
        match source {
            PageSource::Server => (self.items.clone(), self.page),
            PageSource::Client => {
                let rows = self.filtered();
                let mut page = self.page;
                page.set_total(rows.len() as u64);
                (page.window(&rows).to_vec(), page)
            }
        }
    }

    fn append(&mut self, item: T) {
        self.items.push(item);
    }

    fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|row| row.key() == item.key()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: &EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|row| !row.has_key(id));
        self.items.len() != before
    }
}

/// Persistable slice of a collection store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    default,
    bound(
        serialize = "T: Serialize, F: Serialize",
        deserialize = "T: Deserialize<'de>, F: Deserialize<'de> + Default"
    )
)]
pub struct CollectionSnapshot<T, F> {
    pub items: Vec<T>,
    pub search_term: String,
    pub sort: SortState,
    pub filter: F,
    pub page_size: Option<u32>,
}

impl<T, F: Default> Default for CollectionSnapshot<T, F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_term: String::new(),
            sort: SortState::Unsorted,
            filter: F::default(),
            page_size: None,
        }
    }
}

/// Observable collection with optimistic local splicing.
///
/// Every call runs to completion; overlapping fetches are neither
/// de-duplicated nor cancelled, so whichever response resolves last owns the
/// list and the loading/error flags.
pub struct CollectionStore<B: CollectionBackend> {
    backend: Arc<B>,
    state: Arc<RwLock<CollectionState<B::Item, B::Filter>>>,
}

impl<B: CollectionBackend> Clone for CollectionStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            state: Arc::clone(&self.state),
        }
    }
}

impl<B: CollectionBackend> fmt::Debug for CollectionStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("CollectionStore")
            .field("name", &B::NAME)
            .field("items", &state.items.len())
            .field("page", &state.page)
            .field("loading", &state.loading)
            .field("error", &state.error)
            .finish()
    }
}

impl<B: CollectionBackend> CollectionStore<B> {
    pub fn new(backend: B, page_size: u32) -> Self {
        Self {
            backend: Arc::new(backend),
            state: Arc::new(RwLock::new(CollectionState::new(page_size))),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // === Reads ===

    /// Raw list as last received or spliced.
    pub fn items(&self) -> Vec<B::Item> {
        self.state.read().items.clone()
    }

    /// Rows of the current page in display order.
    pub fn visible(&self) -> Vec<B::Item> {
        self.state.read().view(B::SOURCE).0
    }

    /// Pagination as the table should render it.
    pub fn page(&self) -> PageState {
        self.state.read().view(B::SOURCE).1
    }

    pub fn search_term(&self) -> String {
        self.state.read().search_term.clone()
    }

    pub fn sort(&self) -> SortState {
        self.state.read().sort.clone()
    }

    pub fn filter(&self) -> B::Filter {
        self.state.read().filter.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn find(&self, id: &EntityId) -> Option<B::Item> {
        self.state
            .read()
            .items
            .iter()
            .find(|row| row.has_key(id))
            .cloned()
    }

    // === Local mutations ===

    pub fn set_page(&self, page: u32) {
        self.state.write().page.set_page(page);
    }

    pub fn set_page_size(&self, page_size: u32) {
        self.state.write().page.set_page_size(page_size);
    }

    /// Replaces the search term and returns to the first page.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let mut state = self.state.write();
        state.search_term = term.into();
        state.page.set_page(1);
    }

    /// Replaces the sort and returns to the first page.
    pub fn set_sort(&self, sort: SortState) {
        let mut state = self.state.write();
        debug!(store = B::NAME, ?sort, "sort changed");
        state.sort = sort;
        state.page.set_page(1);
    }

    /// Replaces the domain filter and returns to the first page.
    ///
    /// For self-managed sorts a different filter also clears the sort.
    pub fn set_filter(&self, filter: B::Filter) {
        let mut state = self.state.write();
        if B::SELF_MANAGED_SORT
            && state.filter != filter
            && state.sort != SortState::Unsorted
        {
            debug!(store = B::NAME, "dataset changed, sort cleared");
            state.sort = SortState::Unsorted;
        }
        state.filter = filter;
        state.page.set_page(1);
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    // === Remote operations ===

    /// Loads the list for the current query.
    ///
    /// On failure the previous list is kept and the message is stored.
    pub async fn fetch(&self) -> ApiResult<()> {
        let request = {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
            state.request()
        };
        debug!(
            store = B::NAME,
            page = request.page,
            page_size = request.page_size,
            search = request.search.as_deref(),
            "fetching"
        );

        let result = self.backend.list(&request).await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(page) => {
                info!(store = B::NAME, rows = page.items.len(), "fetched");
                state.accept(page, B::SOURCE);
                Ok(())
            }
            Err(err) => {
                warn!(store = B::NAME, error = %err, "fetch failed");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Sets the page and, for server-paginated collections, refetches.
    pub async fn go_to_page(&self, page: u32) -> ApiResult<()> {
        self.set_page(page);
        self.refetch_if_server().await
    }

    /// Sets the sort and, for server-paginated collections, refetches.
    pub async fn change_sort(&self, sort: SortState) -> ApiResult<()> {
        self.set_sort(sort);
        self.refetch_if_server().await
    }

    /// Updates the search term and schedules a debounced refetch.
    ///
    /// Client-paginated collections filter locally, so nothing is
    /// scheduled for them.
    pub fn search(&self, term: impl Into<String>, debouncer: &Debouncer) {
        self.set_search_term(term);
        if B::SOURCE == PageSource::Server {
            let store = self.clone();
            debouncer.schedule(move || async move {
                // The error is already recorded on the store.
                let _ = store.fetch().await;
            });
        }
    }

    pub async fn create(&self, payload: &B::Create) -> ApiResult<B::Item> {
        self.backend.validate_create(payload)?;
        let result = self.tracked("create", self.backend.create(payload)).await;
        self.splice(result, |state, item| state.append(item.clone()))
    }

    pub async fn update(
        &self,
        id: &EntityId,
        payload: &B::Update,
    ) -> ApiResult<B::Item> {
        let result = self
            .tracked("update", self.backend.update(id, payload))
            .await;
        self.splice(result, |state, item| {
            if !state.replace(item.clone()) {
                debug!(store = B::NAME, id = %item.key(), "row not loaded");
            }
        })
    }

    pub async fn remove(&self, id: &EntityId) -> ApiResult<()> {
        let result = self.tracked("remove", self.backend.remove(id)).await;
        self.splice(result, |state, _| {
            state.remove(id);
        })
    }

    /// Replaces a row in place with a fresh copy from the backend.
    pub fn upsert_local(&self, item: B::Item) {
        let mut state = self.state.write();
        if !state.replace(item.clone()) {
            state.append(item);
        }
    }

    /// Runs `call` with the loading flag raised, recording any failure.
    pub(crate) async fn tracked<R, Fut>(
        &self,
        action: &'static str,
        call: Fut,
    ) -> ApiResult<R>
    where
        Fut: Future<Output = ApiResult<R>>,
    {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = call.await;

        let mut state = self.state.write();
        state.loading = false;
        match &result {
            Ok(_) => info!(store = B::NAME, action, "completed"),
            Err(err) => {
                warn!(store = B::NAME, action, error = %err, "failed");
                state.error = Some(err.to_string());
            }
        }
        result
    }

    fn splice<R>(
        &self,
        result: ApiResult<R>,
        apply: impl FnOnce(&mut CollectionState<B::Item, B::Filter>, &R),
    ) -> ApiResult<R> {
        if let Ok(value) = &result {
            let mut state = self.state.write();
            apply(&mut *state, value);
        }
        result
    }

    pub(crate) async fn refetch_if_server(&self) -> ApiResult<()> {
        match B::SOURCE {
            PageSource::Server => self.fetch().await,
            PageSource::Client => Ok(()),
        }
    }

    // === Snapshots ===

    pub fn snapshot(&self) -> CollectionSnapshot<B::Item, B::Filter> {
        let state = self.state.read();
        CollectionSnapshot {
            items: state.items.clone(),
            search_term: state.search_term.clone(),
            sort: state.sort.clone(),
            filter: state.filter.clone(),
            page_size: Some(state.page.page_size()),
        }
    }

    /// Restores a snapshot and returns to the first page.
    pub fn restore(&self, snapshot: CollectionSnapshot<B::Item, B::Filter>) {
        let mut state = self.state.write();
        state.items = snapshot.items;
        state.search_term = snapshot.search_term;
        state.sort = snapshot.sort;
        state.filter = snapshot.filter;
        if let Some(size) = snapshot.page_size {
            state.page.set_page_size(size);
        }
        state.page.set_page(1);
        let total = state.items.len() as u64;
        state.page.set_total(total);
    }
}
