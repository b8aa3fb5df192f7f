use crate::models::Theme;
use crate::storage::{KeyValueStore, DASHBOARD_COLOR_KEY, DASHBOARD_THEME_KEY};
use crate::util::hex_to_hsl;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;

/// Dashboard-level preference; pages carry a plain [`Theme`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn resolve(self, system: Theme) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::System => system,
        }
    }

    /// light -> dark -> system -> light
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        // Accept both bare and JSON-quoted values.
        match s.trim().trim_matches('"') {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DashboardPrefs {
    pub mode: ThemeMode,
    pub custom_primary_color: Option<String>,
}

impl DashboardPrefs {
    pub fn load(store: &impl KeyValueStore) -> Self {
        let mode = store
            .get(DASHBOARD_THEME_KEY)
            .ok()
            .flatten()
            .and_then(|v| ThemeMode::parse(&v))
            .unwrap_or_default();
        let custom_primary_color = store
            .get(DASHBOARD_COLOR_KEY)
            .ok()
            .flatten()
            .filter(|v| !v.trim().is_empty());
        Self {
            mode,
            custom_primary_color,
        }
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        if let Err(e) = store.set(DASHBOARD_THEME_KEY, self.mode.as_str()) {
            log::warn!("{e}");
        }
        let result = match &self.custom_primary_color {
            Some(c) => store.set(DASHBOARD_COLOR_KEY, c),
            None => store.remove(DASHBOARD_COLOR_KEY),
        };
        if let Err(e) = result {
            log::warn!("{e}");
        }
    }
}

/// OS-level `prefers-color-scheme`.
pub(crate) fn system_theme() -> Theme {
    let dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false);
    if dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Toggle the root `dark` class and set or clear the `--primary` override.
pub(crate) fn apply_theme(theme: Theme, custom_primary_color: Option<&str>) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };

    let _ = root.class_list().toggle_with_force("dark", theme.is_dark());

    let Ok(root) = root.dyn_into::<web_sys::HtmlElement>() else {
        return;
    };
    let style = root.style();
    match custom_primary_color.and_then(hex_to_hsl) {
        Some(hsl) => {
            let _ = style.set_property("--primary", &hsl.to_string());
            let _ = style.set_property("--ring", &hsl.to_string());
        }
        None => {
            let _ = style.remove_property("--primary");
            let _ = style.remove_property("--ring");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_theme_mode_resolves_against_system() {
        assert_eq!(ThemeMode::System.resolve(Theme::Dark), Theme::Dark);
        assert_eq!(ThemeMode::Light.resolve(Theme::Dark), Theme::Light);
        assert_eq!(ThemeMode::Dark.resolve(Theme::Light), Theme::Dark);
        assert_eq!(ThemeMode::Light.next().next().next(), ThemeMode::Light);
    }

    #[test]
    fn test_dashboard_prefs_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(DashboardPrefs::load(&store), DashboardPrefs::default());

        let prefs = DashboardPrefs {
            mode: ThemeMode::Dark,
            custom_primary_color: Some("#ff0000".to_string()),
        };
        prefs.save(&store);
        assert_eq!(DashboardPrefs::load(&store), prefs);

        DashboardPrefs {
            mode: ThemeMode::Light,
            custom_primary_color: None,
        }
        .save(&store);
        let loaded = DashboardPrefs::load(&store);
        assert_eq!(loaded.mode, ThemeMode::Light);
        assert!(loaded.custom_primary_color.is_none());
    }

    #[test]
    fn test_dashboard_theme_accepts_quoted_values() {
        let store = MemoryStore::new();
        store.raw_set(DASHBOARD_THEME_KEY, "\"dark\"");
        assert_eq!(DashboardPrefs::load(&store).mode, ThemeMode::Dark);
    }
}
