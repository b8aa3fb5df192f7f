use crate::browser;
use crate::models::{LinkGroup, PageDocument, PagePatch, Theme};
use crate::page_store::PageStore;
use crate::share::import_url;
use crate::state::session::{
    hash_changed, open_group_url, plan_open, Location, PageSession, PageView,
};
use crate::storage::BrowserStore;
use crate::theme::{apply_theme, system_theme};
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PagePhase {
    Loading,
    /// Bound to a hash and persisted.
    Ready,
    /// Showing a shared page that has no hash yet.
    Preview,
    /// The shared payload could not be read.
    ImportError,
}

/// Reactive wrapper around [`PageSession`] for the page view.
///
/// Mutations go through the store first and then update the signals, so the
/// UI reflects an edit even when the browser refused to persist it.
#[derive(Clone, Copy)]
pub(crate) struct PageState {
    store: BrowserStore,
    pub phase: RwSignal<PagePhase>,
    /// `None` while previewing shared data.
    pub hash: RwSignal<Option<String>>,
    pub document: RwSignal<PageDocument>,
    pub error: RwSignal<Option<String>>,
    /// Transient message (skipped links, copied share link, ...).
    pub notice: RwSignal<Option<String>>,
}

fn current_location() -> Location {
    Location {
        pathname: browser::location_pathname(),
        search: browser::location_search(),
        hash: browser::location_hash(),
    }
}

impl PageState {
    pub fn new(store: BrowserStore) -> Self {
        Self {
            store,
            phase: RwSignal::new(PagePhase::Loading),
            hash: RwSignal::new(None),
            document: RwSignal::new(PageDocument::new_default(Theme::Light)),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
        }
    }

    fn session(&self) -> PageSession<BrowserStore> {
        PageSession::new(PageStore::new(self.store), system_theme())
    }

    fn current_view(&self) -> Option<PageView> {
        match (self.phase.get_untracked(), self.hash.get_untracked()) {
            (PagePhase::Ready, Some(hash)) => Some(PageView::Page {
                hash,
                document: self.document.get_untracked(),
            }),
            (PagePhase::Preview, _) => Some(PageView::Preview(self.document.get_untracked())),
            _ => None,
        }
    }

    fn show(&self, view: PageView) {
        let (hash, document, phase) = match view {
            PageView::Page { hash, document } => (Some(hash), document, PagePhase::Ready),
            PageView::Preview(document) => (None, document, PagePhase::Preview),
            PageView::ImportError(message) => {
                self.error.set(Some(message));
                self.phase.set(PagePhase::ImportError);
                return;
            }
        };
        apply_theme(document.theme, document.custom_primary_color.as_deref());
        self.hash.set(hash);
        self.document.set(document);
        self.error.set(None);
        self.phase.set(phase);
    }

    /// Load whatever the current location points at: a shared preview, an
    /// existing page, or a freshly created one.
    pub fn load_from_location(&self) {
        self.phase.set(PagePhase::Loading);

        let landing = self.session().land(&current_location());
        if let Some(url) = &landing.rewrite {
            browser::replace_url(url);
        }
        self.show(landing.view);
        if let Some(group) = landing.open_group {
            self.open_group(&group);
        }
    }

    /// Back/forward or a hand-edited fragment.
    pub fn on_hash_change(&self) {
        let shown = match self.phase.get_untracked() {
            PagePhase::Ready => self.hash.get_untracked(),
            _ => None,
        };
        if hash_changed(shown.as_deref(), &current_location()) {
            self.load_from_location();
        }
    }

    fn apply(&self, patch: PagePatch) {
        let Some(view) = self.current_view() else {
            return;
        };
        if let Some(saved) = self.session().edit(&view, patch, &current_location()) {
            if let Some(url) = &saved.rewrite {
                browser::replace_url(url);
            }
            self.show(PageView::Page {
                hash: saved.hash,
                document: saved.document,
            });
        }
    }

    pub fn set_page_title(&self, title: String) {
        self.apply(PagePatch::title(title));
    }

    pub fn set_link_groups(&self, groups: Vec<LinkGroup>) {
        self.apply(PagePatch::groups(groups));
    }

    pub fn set_theme(&self, theme: Theme) {
        self.apply(PagePatch::theme(theme));
    }

    pub fn set_custom_primary_color(&self, color: Option<String>) {
        self.apply(PagePatch::primary_color(color));
    }

    /// Save the previewed shared page under a new hash.
    pub fn save_preview(&self) {
        if self.phase.get_untracked() != PagePhase::Preview {
            return;
        }
        let saved = self
            .session()
            .save_preview(self.document.get_untracked(), &current_location());
        if let Some(url) = &saved.rewrite {
            browser::replace_url(url);
        }
        self.show(PageView::Page {
            hash: saved.hash,
            document: saved.document,
        });
    }

    /// Start a blank page under a new hash and navigate to it.
    pub fn create_new_page(&self) {
        let url = self.session().new_page(&current_location());
        browser::push_url(&url);
        self.load_from_location();
    }

    pub fn delete_current_page(&self) {
        let location = current_location();
        let next = match self.hash.get_untracked() {
            Some(hash) => self.session().delete(&hash, &location),
            None => location.pathname,
        };
        browser::replace_url(&next);
        self.load_from_location();
    }

    /// Open every valid link of a group in new tabs.
    pub fn open_group(&self, group: &LinkGroup) {
        let plan = plan_open(group);
        for url in &plan.urls {
            if !browser::open_in_new_tab(url) {
                log::info!("browser blocked opening {url}");
            }
        }
        self.notice.set(plan.notice);
    }

    /// Open this page in a new window that will open `group_id`'s links.
    pub fn open_group_in_new_window(&self, group_id: &str) {
        let Some(hash) = self.hash.get_untracked() else {
            return;
        };
        let url = open_group_url(&current_location(), &hash, group_id);
        if !browser::open_popup(&url) {
            self.notice.set(Some("The browser blocked the new window".to_string()));
        }
    }

    /// Copy an import link for the current document.
    pub fn copy_share_link(&self, origin: &str) {
        let doc = self.document.get_untracked();
        match import_url(origin, &doc) {
            Ok(url) => {
                if browser::copy_to_clipboard(&url) {
                    self.notice.set(Some("Share link copied to clipboard".to_string()));
                } else {
                    self.notice.set(Some(format!("Copy this link to share: {url}")));
                }
            }
            Err(e) => {
                log::warn!("could not build share link: {e}");
                self.notice.set(Some(e.to_string()));
            }
        }
    }
}
