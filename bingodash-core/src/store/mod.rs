//! Per-domain collection stores.
//!
//! Each screen gets a [`CollectionStore`] parameterized by a
//! [`CollectionBackend`] that maps the generic list/create/update/remove
//! contract onto the matching [`AdminApi`](crate::api::AdminApi) calls.

pub mod backend;
pub mod bingo_cards;
pub mod challenges;
pub mod collection;
pub mod promo_codes;
pub mod revenue;
pub mod users;

pub use backend::CollectionBackend;
pub use bingo_cards::{BingoCardStore, BingoCardsBackend};
pub use challenges::{ChallengeStore, ChallengesBackend};
pub use collection::{CollectionSnapshot, CollectionState, CollectionStore};
pub use promo_codes::{PromoCodeStore, PromoCodesBackend};
pub use revenue::{RevenueState, RevenueStore};
pub use users::{UserStore, UsersBackend};
