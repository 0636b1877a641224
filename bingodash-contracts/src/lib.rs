//! Trait surfaces that describe how bingodash records behave inside
//! collection views.

pub mod field;
pub mod impls;
pub mod keyed;
pub mod search;

/// Frequently used trait combinators for store and view crates.
pub mod prelude {
    pub use super::field::{FieldAccess, FieldValue};
    pub use super::keyed::Keyed;
    pub use super::search::Searchable;

    /// Everything a record needs to live in a collection store.
    pub trait CollectionItem:
        Keyed + FieldAccess + Searchable + Clone + Send + Sync + 'static
    {
    }

    impl<T> CollectionItem for T where
        T: Keyed + FieldAccess + Searchable + Clone + Send + Sync + 'static
    {
    }
}
