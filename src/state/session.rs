use crate::models::{LinkGroup, PageDocument, PagePatch, Theme};
use crate::page_store::{PageStore, Resolution};
use crate::share::{
    decode_shared_data, raw_query_param, strip_query_params, OPEN_GROUP_PARAM, SHARED_DATA_PARAM,
};
use crate::storage::KeyValueStore;
use crate::util::classify_links;

/// The parts of the address bar the page view reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Location {
    pub pathname: String,
    /// `?a=b` or empty.
    pub search: String,
    /// `#hash` or empty.
    pub hash: String,
}

impl Location {
    #[cfg(test)]
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.find('#') {
            Some(i) => (&url[..i], url[i..].to_string()),
            None => (url, String::new()),
        };
        let (pathname, search) = match rest.find('?') {
            Some(i) => (&rest[..i], rest[i..].to_string()),
            None => (rest, String::new()),
        };
        Self {
            pathname: pathname.to_string(),
            search,
            hash,
        }
    }

    pub fn fragment(&self) -> &str {
        self.hash.trim().trim_start_matches('#')
    }

    fn href_with(&self, search: &str, hash: &str) -> String {
        format!("{}{}#{}", self.pathname, search, hash)
    }
}

/// What the page view is showing.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PageView {
    /// Bound to a hash and persisted.
    Page { hash: String, document: PageDocument },
    /// A shared page that has no hash yet.
    Preview(PageDocument),
    /// The shared payload could not be read.
    ImportError(String),
}

/// Outcome of reading a location.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Landing {
    pub view: PageView,
    /// Address to swap in with `history.replaceState`.
    pub rewrite: Option<String>,
    /// Group named by `openGroupInNewWindow`, to open right away.
    pub open_group: Option<LinkGroup>,
}

/// A write that left the view bound to `hash`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Saved {
    pub hash: String,
    pub document: PageDocument,
    pub rewrite: Option<String>,
}

/// Page view decisions over any store. Side effects on the browser are the
/// caller's job; this only reads and writes the store.
pub(crate) struct PageSession<S> {
    pages: PageStore<S>,
    system_theme: Theme,
}

impl<S: KeyValueStore> PageSession<S> {
    pub fn new(pages: PageStore<S>, system_theme: Theme) -> Self {
        Self {
            pages,
            system_theme,
        }
    }

    /// Shared data wins over the fragment. Otherwise the fragment's page is
    /// loaded or created, and a pending open-group instruction is consumed.
    pub fn land(&self, location: &Location) -> Landing {
        if let Some(raw) = raw_query_param(&location.search, SHARED_DATA_PARAM) {
            let view = match decode_shared_data(raw) {
                Ok(shared) => PageView::Preview(shared.into_document(self.system_theme)),
                Err(e) => {
                    log::warn!("could not import shared page: {e}");
                    PageView::ImportError(e.to_string())
                }
            };
            return Landing {
                view,
                rewrite: None,
                open_group: None,
            };
        }

        let resolved = self
            .pages
            .resolve(Some(location.fragment()), self.system_theme);
        let requested = raw_query_param(&location.search, OPEN_GROUP_PARAM).map(decode_param);

        let rewrite = (resolved.resolution == Resolution::CreatedFresh || requested.is_some())
            .then(|| {
                let search = strip_query_params(&location.search, &[OPEN_GROUP_PARAM]);
                location.href_with(&search, &resolved.hash)
            });

        let open_group = requested.and_then(|id| {
            let group = resolved
                .document
                .link_groups
                .iter()
                .find(|g| g.id == id)
                .cloned();
            if group.is_none() {
                log::info!("group {id} is not on page {}", resolved.hash);
            }
            group
        });

        Landing {
            view: PageView::Page {
                hash: resolved.hash,
                document: resolved.document,
            },
            rewrite,
            open_group,
        }
    }

    /// Apply an edit to what is shown. Editing a preview saves it under a
    /// new hash first.
    pub fn edit(&self, view: &PageView, patch: PagePatch, location: &Location) -> Option<Saved> {
        match view {
            PageView::Page { hash, document } => Some(Saved {
                hash: hash.clone(),
                document: self.pages.update(hash, document, patch),
                rewrite: None,
            }),
            PageView::Preview(document) => {
                let mut next = document.clone();
                patch.apply_to(&mut next);
                Some(self.save_preview(next, location))
            }
            PageView::ImportError(_) => None,
        }
    }

    /// Bind a previewed document to a new hash and drop `sharedData` from
    /// the address.
    pub fn save_preview(&self, document: PageDocument, location: &Location) -> Saved {
        let (hash, document) = self.pages.save_new(document);
        let search = strip_query_params(&location.search, &[SHARED_DATA_PARAM]);
        Saved {
            rewrite: Some(location.href_with(&search, &hash)),
            hash,
            document,
        }
    }

    /// Save a blank page and return the address to push.
    pub fn new_page(&self, location: &Location) -> String {
        let hash = self
            .pages
            .create_page(PageDocument::new_default(self.system_theme));
        let search = strip_query_params(&location.search, &[SHARED_DATA_PARAM]);
        location.href_with(&search, &hash)
    }

    /// Delete the page and return the bare address to replace; landing
    /// there starts a fresh page.
    pub fn delete(&self, hash: &str, location: &Location) -> String {
        self.pages.delete_page(hash);
        location.pathname.clone()
    }
}

/// Whether a `hashchange` moved away from the page being shown.
pub(crate) fn hash_changed(shown: Option<&str>, location: &Location) -> bool {
    shown != Some(location.fragment())
}

/// Links to open for a group, and the notice for any that were skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OpenPlan {
    pub urls: Vec<String>,
    pub notice: Option<String>,
}

pub(crate) fn plan_open(group: &LinkGroup) -> OpenPlan {
    let (urls, invalid) = classify_links(&group.urls);
    let notice = (!invalid.is_empty()).then(|| {
        log::info!("skipped {} invalid link(s) in group {}", invalid.len(), group.id);
        format!(
            "Skipped {} invalid link(s): {}",
            invalid.len(),
            invalid.join(", ")
        )
    });
    OpenPlan { urls, notice }
}

/// Address that reopens page `hash` and opens `group_id` once loaded.
pub(crate) fn open_group_url(location: &Location, hash: &str, group_id: &str) -> String {
    format!(
        "{}?{}={}#{}",
        location.pathname,
        OPEN_GROUP_PARAM,
        urlencoding::encode(group_id),
        hash
    )
}

fn decode_param(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
