pub(crate) mod page;
pub(crate) mod session;

use crate::config::EnvConfig;
use crate::storage::{load_flag, BrowserStore, TOUR_TAKEN_KEY};
use leptos::prelude::*;

pub(crate) use page::{PagePhase, PageState};

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: EnvConfig,

    /// Persistence for every view.
    pub store: BrowserStore,

    /// The page view's active document.
    pub page: PageState,

    /// First-visit welcome card.
    pub tour_taken: RwSignal<bool>,
}

impl AppState {
    pub fn new(config: EnvConfig, store: BrowserStore) -> Self {
        Self {
            config,
            store,
            page: PageState::new(store),
            tour_taken: RwSignal::new(load_flag(&store, TOUR_TAKEN_KEY)),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
