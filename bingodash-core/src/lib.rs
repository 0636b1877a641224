//! Collection-view engine and REST plumbing for the Health Bingo admin
//! dashboard.
//!
//! The crate is split along the same seams the dashboard screens use:
//! [`query`] holds the pure sort/page/search machinery, [`api`] talks to the
//! backend, and [`store`] ties both together into per-domain collection
//! stores.

pub mod api;
pub mod auth;
pub mod context;
pub mod debounce;
pub mod error;
pub mod persistence;
pub mod query;
pub mod store;

pub use bingodash_contracts as contracts;
pub use bingodash_model as model;

pub use api::{AdminApi, HttpApiClient, ListRequest};
pub use auth::{AuthService, AuthSession};
pub use context::{AdminContext, Screen, StoreSettings};
pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, Debouncer};
pub use error::{ApiError, ApiResult};
pub use persistence::{SnapshotError, SnapshotStore};
pub use query::{
    ColumnSpec, ExternallyDrivenSort, PageSource, PageState, SelfManagedSort,
    SortController, SortDirection, SortState, compare_values, sort_items,
};
pub use store::{
    BingoCardStore, ChallengeStore, CollectionBackend, CollectionSnapshot,
    CollectionStore, PromoCodeStore, RevenueStore, UserStore,
};
