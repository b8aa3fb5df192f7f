mod app;
mod browser;
mod components;
mod config;
mod dashboard;
mod forms;
mod models;
mod page_store;
mod pages;
mod share;
mod state;
mod storage;
mod theme;
mod util;

use crate::app::App;
use crate::config::EnvConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    let config = EnvConfig::new();
    if console_log::init_with_level(config.log_level()).is_err() {
        web_sys::console::warn_1(&"logger was already initialized".into());
    }
    log::debug!("starting linkwarp, share origin {}", config.share_origin());
    mount_to_body(App);
}

#[cfg(test)]
mod tests {
    use crate::dashboard::Dashboard;
    use crate::models::{LinkGroup, PageDocument, Theme};
    use crate::page_store::PageStore;
    use crate::share::{decode_shared_data, raw_query_param, SHARED_DATA_PARAM};
    use crate::storage::MemoryStore;

    fn clock() -> i64 {
        1_700_000_000_000
    }

    fn fixed_hash() -> String {
        "shared01".to_string()
    }

    #[test]
    fn test_share_link_imports_into_another_browser() {
        let alice = MemoryStore::new();
        let doc = PageDocument {
            page_title: "Work".to_string(),
            link_groups: vec![LinkGroup {
                id: "g1".to_string(),
                name: "Dev".to_string(),
                icon: "Code".to_string(),
                urls: vec!["github.com".to_string()],
            }],
            theme: Theme::Dark,
            custom_primary_color: Some("#3b82f6".to_string()),
            last_modified: None,
        };
        let hash = PageStore::with_hooks(alice.clone(), clock, fixed_hash).create_page(doc);

        let url = Dashboard::new(alice)
            .share_link("https://linkwarp.example", &hash, Theme::Light)
            .expect("page should be readable")
            .expect("page should encode");
        let search = url
            .split_once('?')
            .map(|(_, rest)| format!("?{}", rest.split('#').next().unwrap_or_default()))
            .expect("url should carry a query");
        let raw = raw_query_param(&search, SHARED_DATA_PARAM).expect("sharedData present");
        let shared = decode_shared_data(raw).expect("payload should decode");

        let bob = MemoryStore::new();
        let bob_pages = PageStore::with_hooks(bob.clone(), clock, fixed_hash);
        let (bob_hash, _) = bob_pages.save_new(shared.into_document(Theme::Light));

        let listed = Dashboard::new(bob).list_pages(Theme::Light);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].hash, bob_hash);
        assert_eq!(listed[0].title, "Work");
        assert_eq!(listed[0].group_count, 1);
        assert_eq!(listed[0].theme, Theme::Dark);
        assert_eq!(listed[0].last_modified, Some(clock()));
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::config::EnvConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_env_config_defaults_to_window_origin() {
        let config = EnvConfig::new();
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        if config.share_base_url.is_none() {
            assert_eq!(config.share_origin(), origin);
        }
    }
}
