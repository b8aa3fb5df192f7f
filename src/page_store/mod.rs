use crate::models::{PageDocument, PagePatch, StoredPage, Theme};
use crate::storage::{load_json, page_key, save_json, KeyValueStore, DASHBOARD_ORDER_KEY};

/// How [`PageStore::resolve`] arrived at its document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// The fragment named an existing page.
    Loaded,
    /// The fragment named a page nobody had saved yet.
    CreatedForFragment,
    /// There was no fragment; a fresh hash was minted and must replace the
    /// location's fragment.
    CreatedFresh,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ResolvedPage {
    pub hash: String,
    pub document: PageDocument,
    pub resolution: Resolution,
}

/// Hash-addressed page persistence.
///
/// Reads that fail are treated as "no such page". Writes that fail are
/// logged and otherwise ignored; callers keep their in-memory copy either
/// way.
#[derive(Clone, Debug)]
pub(crate) struct PageStore<S> {
    store: S,
    clock: fn() -> i64,
    mint_hash: fn() -> String,
}

impl<S: KeyValueStore> PageStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: crate::util::now_ms,
            mint_hash: crate::util::new_page_hash,
        }
    }

    #[cfg(test)]
    pub fn with_hooks(store: S, clock: fn() -> i64, mint_hash: fn() -> String) -> Self {
        Self {
            store,
            clock,
            mint_hash,
        }
    }

    /// The page under `hash`, if one parses. Groups stored without an id get
    /// one, and the repaired page is written back so the ids stay stable.
    pub fn load(&self, hash: &str, system_theme: Theme) -> Option<PageDocument> {
        if hash.trim().is_empty() {
            return None;
        }
        let stored: StoredPage = load_json(&self.store, &page_key(hash))?;
        let mut document = stored.into_document(system_theme);
        if document.fill_missing_group_ids() {
            self.persist(hash, &document);
        }
        Some(document)
    }

    fn persist(&self, hash: &str, doc: &PageDocument) {
        if let Err(e) = save_json(&self.store, &page_key(hash), doc) {
            log::warn!("page {hash} was not saved: {e}");
        }
    }

    /// Pick the page for a location fragment (with or without the leading
    /// `#`), creating and saving a default page when needed.
    pub fn resolve(&self, fragment: Option<&str>, system_theme: Theme) -> ResolvedPage {
        let fragment = fragment
            .map(|f| f.trim().trim_start_matches('#'))
            .filter(|f| !f.is_empty());

        match fragment {
            Some(hash) => match self.load(hash, system_theme) {
                Some(document) => ResolvedPage {
                    hash: hash.to_string(),
                    document,
                    resolution: Resolution::Loaded,
                },
                None => {
                    let document = PageDocument::new_default(system_theme);
                    self.persist(hash, &document);
                    ResolvedPage {
                        hash: hash.to_string(),
                        document,
                        resolution: Resolution::CreatedForFragment,
                    }
                }
            },
            None => {
                let hash = (self.mint_hash)();
                let document = PageDocument::new_default(system_theme);
                self.persist(&hash, &document);
                log::debug!("started new page {hash}");
                ResolvedPage {
                    hash,
                    document,
                    resolution: Resolution::CreatedFresh,
                }
            }
        }
    }

    /// Read-modify-write of the page under `hash`. Always stamps
    /// `last_modified`, and returns the merged document even when the write
    /// failed.
    pub fn update(&self, hash: &str, current: &PageDocument, patch: PagePatch) -> PageDocument {
        let mut next = current.clone();
        patch.apply_to(&mut next);
        next.last_modified = Some((self.clock)());
        self.persist(hash, &next);
        next
    }

    /// Save `document` under a brand-new hash and return that hash.
    ///
    /// A pristine default document is left unstamped; anything else is
    /// stamped so it sorts as recent.
    pub fn create_page(&self, mut document: PageDocument) -> String {
        let hash = (self.mint_hash)();
        if !document.is_empty_default() {
            document.last_modified = Some((self.clock)());
        }
        self.persist(&hash, &document);
        hash
    }

    /// Bind an in-memory document (a shared preview) to a new hash. Saving
    /// a preview is a write like any edit, so it is always stamped.
    pub fn save_new(&self, mut document: PageDocument) -> (String, PageDocument) {
        let hash = (self.mint_hash)();
        document.fill_missing_group_ids();
        document.last_modified = Some((self.clock)());
        self.persist(&hash, &document);
        (hash, document)
    }

    /// Remove the page and drop it from the dashboard order list.
    pub fn delete_page(&self, hash: &str) {
        if let Err(e) = self.store.remove(&page_key(hash)) {
            log::warn!("page {hash} was not removed: {e}");
        }

        let Some(mut order) = load_json::<_, Vec<String>>(&self.store, DASHBOARD_ORDER_KEY) else {
            return;
        };
        let before = order.len();
        order.retain(|h| h != hash);
        if order.len() != before {
            if let Err(e) = save_json(&self.store, DASHBOARD_ORDER_KEY, &order) {
                log::warn!("dashboard order was not updated: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinkGroup, DEFAULT_PAGE_TITLE};
    use crate::storage::MemoryStore;

    fn clock() -> i64 {
        1_000
    }

    fn mint() -> String {
        "fresh001".to_string()
    }

    fn store_with(mem: &MemoryStore) -> PageStore<MemoryStore> {
        PageStore::with_hooks(mem.clone(), clock, mint)
    }

    fn group(id: &str) -> LinkGroup {
        LinkGroup {
            id: id.to_string(),
            name: "Dev".to_string(),
            icon: "Code".to_string(),
            urls: vec!["github.com".to_string()],
        }
    }

    #[test]
    fn test_resolve_unknown_fragment_creates_default_page() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);

        let resolved = pages.resolve(Some("#abc123"), Theme::Dark);
        assert_eq!(resolved.hash, "abc123");
        assert_eq!(resolved.resolution, Resolution::CreatedForFragment);
        assert!(resolved.document.link_groups.is_empty());
        assert_eq!(resolved.document.page_title, DEFAULT_PAGE_TITLE);
        assert_eq!(resolved.document.theme, Theme::Dark);
        assert!(mem.contains("linkwarp_abc123"));
    }

    #[test]
    fn test_resolve_existing_fragment_loads_as_is() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);
        mem.raw_set(
            "linkwarp_abc123",
            r#"{"pageTitle":"Work","linkGroups":[],"theme":"dark","lastModified":5}"#,
        );

        let resolved = pages.resolve(Some("abc123"), Theme::Light);
        assert_eq!(resolved.resolution, Resolution::Loaded);
        assert_eq!(resolved.document.page_title, "Work");
        assert_eq!(resolved.document.last_modified, Some(5));
    }

    #[test]
    fn test_resolve_without_fragment_mints_hash() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);

        for fragment in [None, Some(""), Some("#")] {
            let resolved = pages.resolve(fragment, Theme::Light);
            assert_eq!(resolved.hash, "fresh001");
            assert_eq!(resolved.resolution, Resolution::CreatedFresh);
        }
        assert!(mem.contains("linkwarp_fresh001"));
    }

    #[test]
    fn test_malformed_page_is_treated_as_absent() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);
        mem.raw_set("linkwarp_broken", "{{{");

        let resolved = pages.resolve(Some("broken"), Theme::Light);
        assert_eq!(resolved.resolution, Resolution::CreatedForFragment);
        assert!(resolved.document.is_empty_default());
        assert!(pages.load("broken", Theme::Light).is_some());
    }

    #[test]
    fn test_update_merges_stamps_and_persists() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);
        let resolved = pages.resolve(Some("abc123"), Theme::Light);

        let doc = pages.update("abc123", &resolved.document, PagePatch::title("Work"));
        let doc = pages.update("abc123", &doc, PagePatch::groups(vec![group("g1"), group("g2")]));
        assert_eq!(doc.page_title, "Work");
        assert_eq!(doc.last_modified, Some(1_000));

        let reordered = vec![doc.link_groups[1].clone(), doc.link_groups[0].clone()];
        let doc = pages.update("abc123", &doc, PagePatch::groups(reordered));

        let stored = pages.load("abc123", Theme::Light).expect("saved");
        assert_eq!(stored, doc);
        assert_eq!(stored.link_groups[0].id, "g2");
        assert_eq!(stored.last_modified, Some(1_000));
    }

    #[test]
    fn test_update_survives_write_failure() {
        let mem = MemoryStore::new();
        let pages = PageStore::with_hooks(mem.clone().read_only(), clock, mint);
        let current = PageDocument::new_default(Theme::Light);

        let doc = pages.update("abc123", &current, PagePatch::theme(Theme::Dark));
        assert_eq!(doc.theme, Theme::Dark);
        assert!(pages.load("abc123", Theme::Light).is_none());
    }

    #[test]
    fn test_create_page_stamps_only_non_default_documents() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);

        let hash = pages.create_page(PageDocument::new_default(Theme::Light));
        assert_eq!(hash, "fresh001");
        assert_eq!(pages.load(&hash, Theme::Light).expect("saved").last_modified, None);

        let mut shared = PageDocument::new_default(Theme::Dark);
        shared.page_title = "Shared".to_string();
        let hash = pages.create_page(shared);
        assert_eq!(pages.load(&hash, Theme::Light).expect("saved").last_modified, Some(1_000));
    }

    #[test]
    fn test_save_new_always_stamps() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);

        let (hash, doc) = pages.save_new(PageDocument::new_default(Theme::Dark));
        assert_eq!(hash, "fresh001");
        assert_eq!(doc.last_modified, Some(1_000));
        assert_eq!(pages.load(&hash, Theme::Light), Some(doc));
    }

    #[test]
    fn test_group_without_icon_loads_instead_of_being_replaced() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);
        mem.raw_set(
            "linkwarp_abc",
            r#"{"pageTitle":"Work","linkGroups":[{"id":"g1","name":"Dev","urls":["github.com"]}],"theme":"dark"}"#,
        );

        let resolved = pages.resolve(Some("abc"), Theme::Light);
        assert_eq!(resolved.resolution, Resolution::Loaded);
        assert_eq!(resolved.document.page_title, "Work");
        assert_eq!(resolved.document.link_groups.len(), 1);
        assert_eq!(resolved.document.link_groups[0].icon, "Link");

        let stored = pages.load("abc", Theme::Light).expect("still there");
        assert_eq!(stored.page_title, "Work");
        assert_eq!(stored.link_groups[0].urls, vec!["github.com"]);
    }

    #[test]
    fn test_group_without_id_gets_a_stable_one() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);
        mem.raw_set(
            "linkwarp_abc",
            r#"{"pageTitle":"Work","linkGroups":[{"name":"Dev","urls":["github.com"]}]}"#,
        );

        let first = pages.load("abc", Theme::Light).expect("loads");
        let id = first.link_groups[0].id.clone();
        assert!(!id.is_empty());
        assert_eq!(pages.load("abc", Theme::Light).expect("loads").link_groups[0].id, id);
    }

    #[test]
    fn test_missing_theme_follows_system_preference() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);
        mem.raw_set("linkwarp_abc", r#"{"pageTitle":"Work","linkGroups":[]}"#);

        assert_eq!(pages.resolve(Some("abc"), Theme::Dark).document.theme, Theme::Dark);
        assert_eq!(pages.resolve(Some("abc"), Theme::Light).document.theme, Theme::Light);
    }

    #[test]
    fn test_delete_page_prunes_order_list() {
        let mem = MemoryStore::new();
        let pages = store_with(&mem);
        pages.resolve(Some("a"), Theme::Light);
        pages.resolve(Some("b"), Theme::Light);
        save_json(&mem, DASHBOARD_ORDER_KEY, &vec!["b", "a"]).expect("save order");

        pages.delete_page("a");

        assert!(!mem.contains("linkwarp_a"));
        let order: Vec<String> = load_json(&mem, DASHBOARD_ORDER_KEY).expect("order");
        assert_eq!(order, vec!["b".to_string()]);
    }
}
