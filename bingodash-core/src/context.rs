use std::sync::Arc;
use std::time::Duration;

use crate::api::AdminApi;
use crate::auth::AuthService;
use crate::debounce::{DEFAULT_SEARCH_DEBOUNCE, Debouncer};
use crate::error::ApiResult;
use crate::store::{
    BingoCardStore, BingoCardsBackend, ChallengeStore, ChallengesBackend,
    CollectionBackend, CollectionStore, PromoCodeStore, PromoCodesBackend,
    RevenueStore, UserStore, UsersBackend,
};

/// Page sizes and timing shared by every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    pub users_page_size: u32,
    pub promo_page_size: u32,
    pub cards_page_size: u32,
    pub challenges_page_size: u32,
    pub search_debounce: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            users_page_size: 10,
            promo_page_size: 10,
            cards_page_size: 50,
            challenges_page_size: 10,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

/// A screen's store together with the debouncer for its search box.
#[derive(Debug)]
pub struct Screen<S> {
    pub store: S,
    pub search: Debouncer,
}

impl<B: CollectionBackend> Screen<CollectionStore<B>> {
    /// Initial load when the screen opens. Not debounced.
    pub async fn mount(&self) -> ApiResult<()> {
        self.store.fetch().await
    }

    /// Search-box input: updates the term now, fetches after the quiet
    /// period.
    pub fn type_search(&self, term: impl Into<String>) {
        self.store.search(term, &self.search);
    }
}

/// Root handle the dashboard builds once at startup.
///
/// Each accessor builds a fresh screen; stores are not shared between
/// screens.
#[derive(Clone)]
pub struct AdminContext {
    api: Arc<dyn AdminApi>,
    auth: AuthService,
    settings: StoreSettings,
}

impl std::fmt::Debug for AdminContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminContext")
            .field("auth", &self.auth)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl AdminContext {
    pub fn new(api: Arc<dyn AdminApi>, settings: StoreSettings) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&api)),
            api,
            settings,
        }
    }

    pub fn api(&self) -> &Arc<dyn AdminApi> {
        &self.api
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    fn screen<S>(&self, store: S) -> Screen<S> {
        Screen {
            store,
            search: Debouncer::new(self.settings.search_debounce),
        }
    }

    pub fn users(&self) -> Screen<UserStore> {
        self.screen(UserStore::new(
            UsersBackend::new(Arc::clone(&self.api)),
            self.settings.users_page_size,
        ))
    }

    pub fn promo_codes(&self) -> Screen<PromoCodeStore> {
        self.screen(PromoCodeStore::new(
            PromoCodesBackend::new(Arc::clone(&self.api)),
            self.settings.promo_page_size,
        ))
    }

    pub fn bingo_cards(&self) -> Screen<BingoCardStore> {
        self.screen(BingoCardStore::new(
            BingoCardsBackend::new(Arc::clone(&self.api)),
            self.settings.cards_page_size,
        ))
    }

    pub fn challenges(&self) -> Screen<ChallengeStore> {
        self.screen(ChallengeStore::new(
            ChallengesBackend::new(Arc::clone(&self.api)),
            self.settings.challenges_page_size,
        ))
    }

    pub fn revenue(&self) -> RevenueStore {
        RevenueStore::new(Arc::clone(&self.api))
    }
}
