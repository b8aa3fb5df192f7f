use crate::models::{PageSummary, StoredPage, Theme, DEFAULT_PAGE_TITLE, UNTITLED_PAGE_TITLE};
use crate::share::{share_url, ShareError};
use crate::storage::{
    hash_from_key, load_json, page_key, save_json, KeyValueStore, DASHBOARD_ORDER_KEY, KEY_PREFIX,
};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Listing, ordering and deletion over every page in the store.
pub(crate) struct Dashboard<S> {
    store: S,
}

impl<S: KeyValueStore> Dashboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_order(&self) -> Vec<String> {
        load_json(&self.store, DASHBOARD_ORDER_KEY).unwrap_or_default()
    }

    fn save_order(&self, order: &[String]) {
        if let Err(e) = save_json(&self.store, DASHBOARD_ORDER_KEY, order) {
            log::warn!("dashboard order was not saved: {e}");
        }
    }

    /// Every listable page, in discovery order.
    ///
    /// Pristine default pages are deleted along the way and their hashes
    /// removed from `order`. Unparsable or misshapen entries are skipped but
    /// left in storage.
    fn collect_summaries(&self, system_theme: Theme, order: &mut Vec<String>) -> Vec<PageSummary> {
        let keys = match self.store.list_keys(KEY_PREFIX) {
            Ok(keys) => keys,
            Err(e) => {
                log::warn!("could not enumerate pages: {e}");
                return vec![];
            }
        };

        let mut out = Vec::new();
        for key in keys {
            let Some(hash) = hash_from_key(&key) else {
                continue;
            };

            let raw = match self.store.get(&key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("{e}");
                    continue;
                }
            };

            let page: StoredPage = match serde_json::from_str(&raw) {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("skipping `{key}`: {e}");
                    continue;
                }
            };
            let title = page.page_title;
            let groups = page.link_groups;

            if groups.is_empty() && title == DEFAULT_PAGE_TITLE {
                log::debug!("collecting empty default page {hash}");
                if let Err(e) = self.store.remove(&key) {
                    log::warn!("{e}");
                }
                order.retain(|h| h != hash);
                continue;
            }

            out.push(PageSummary {
                hash: hash.to_string(),
                title: if title.trim().is_empty() {
                    UNTITLED_PAGE_TITLE.to_string()
                } else {
                    title
                },
                group_count: groups.len(),
                theme: page.theme.unwrap_or(system_theme),
                custom_primary_color: page.custom_primary_color,
                last_modified: page.last_modified,
            });
        }
        out
    }

    /// All pages in display order: the persisted order first, then anything
    /// it does not mention, most recently modified first.
    pub fn list_pages(&self, system_theme: Theme) -> Vec<PageSummary> {
        let stored_order = self.load_order();
        let mut order = stored_order.clone();
        let summaries = self.collect_summaries(system_theme, &mut order);

        let mut by_hash: HashMap<String, PageSummary> = summaries
            .into_iter()
            .map(|s| (s.hash.clone(), s))
            .collect();

        order.retain(|h| by_hash.contains_key(h));
        dedup_keep_first(&mut order);
        if order != stored_order {
            self.save_order(&order);
        }

        let mut listed: Vec<PageSummary> = order.iter().filter_map(|h| by_hash.remove(h)).collect();

        let mut rest: Vec<PageSummary> = by_hash.into_values().collect();
        rest.sort_by(compare_unordered);
        listed.extend(rest);
        listed
    }

    /// Persist the order of `pages` as the user arranged it.
    pub fn reorder(&self, pages: &[PageSummary]) {
        let order: Vec<String> = pages.iter().map(|p| p.hash.clone()).collect();
        self.save_order(&order);
    }

    /// Remove a page from storage, the listing and the persisted order.
    pub fn delete_page(&self, hash: &str, pages: &mut Vec<PageSummary>) {
        if let Err(e) = self.store.remove(&page_key(hash)) {
            log::warn!("{e}");
        }
        pages.retain(|p| p.hash != hash);

        let mut order = self.load_order();
        order.retain(|h| h != hash);
        self.save_order(&order);
    }

    /// Share link for a stored page, or `None` when the page cannot be read.
    pub fn share_link(
        &self,
        origin: &str,
        hash: &str,
        system_theme: Theme,
    ) -> Option<Result<String, ShareError>> {
        let stored: StoredPage = load_json(&self.store, &page_key(hash))?;
        Some(share_url(origin, hash, &stored.into_document(system_theme)))
    }
}

fn dedup_keep_first(order: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    order.retain(|h| seen.insert(h.clone()));
}

/// Newest first; stamped before unstamped; then by title.
fn compare_unordered(a: &PageSummary, b: &PageSummary) -> Ordering {
    match (a.last_modified, b.last_modified) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.title.cmp(&b.title)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    }
    .then_with(|| a.hash.cmp(&b.hash))
}
