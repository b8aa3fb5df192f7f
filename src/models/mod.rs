use serde::{Deserialize, Serialize};

/// Title given to pages nobody has renamed yet.
///
/// A page carrying this title and no groups is an "empty default" page and
/// gets collected by the dashboard listing.
pub(crate) const DEFAULT_PAGE_TITLE: &str = "My LinkWarp Page";

/// Shown on the dashboard when a stored title is blank.
pub(crate) const UNTITLED_PAGE_TITLE: &str = "Untitled Page";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Catalog name of the icon shown for groups that never picked one.
pub(crate) const DEFAULT_GROUP_ICON: &str = "Link";

fn default_group_icon() -> String {
    DEFAULT_GROUP_ICON.to_string()
}

/// Every field is optional on the way in: records written by older builds
/// or by hand still load instead of being replaced by a blank page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct LinkGroup {
    /// Empty when the record had none; see
    /// [`PageDocument::fill_missing_group_ids`].
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Name from the icon catalog. Unknown names render the fallback icon.
    #[serde(default = "default_group_icon")]
    pub icon: String,
    /// Raw URLs exactly as the user typed them.
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Persisted unit, one per page hash.
///
/// Reads go through [`StoredPage`], which knows what a missing theme means.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageDocument {
    pub page_title: String,
    pub link_groups: Vec<LinkGroup>,
    pub theme: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_primary_color: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
}

/// A page as read back from storage.
///
/// The page view and the dashboard both parse through this type, so a record
/// is either listed and openable, or skipped by both.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredPage {
    pub page_title: String,
    pub link_groups: Vec<LinkGroup>,
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub custom_primary_color: Option<String>,
    #[serde(default)]
    pub last_modified: Option<i64>,
}

impl StoredPage {
    /// A record without a theme follows the OS preference.
    pub fn into_document(self, system_theme: Theme) -> PageDocument {
        PageDocument {
            page_title: self.page_title,
            link_groups: self.link_groups,
            theme: self.theme.unwrap_or(system_theme),
            custom_primary_color: self.custom_primary_color,
            last_modified: self.last_modified,
        }
    }
}

impl PageDocument {
    pub fn new_default(theme: Theme) -> Self {
        Self {
            page_title: DEFAULT_PAGE_TITLE.to_string(),
            link_groups: vec![],
            theme,
            custom_primary_color: None,
            last_modified: None,
        }
    }

    pub fn is_empty_default(&self) -> bool {
        self.link_groups.is_empty() && self.page_title == DEFAULT_PAGE_TITLE
    }

    /// Mint ids for groups that arrived without one. Returns whether any
    /// group changed.
    pub fn fill_missing_group_ids(&mut self) -> bool {
        let mut changed = false;
        for group in self.link_groups.iter_mut().filter(|g| g.id.trim().is_empty()) {
            group.id = crate::util::new_group_id();
            changed = true;
        }
        changed
    }
}

/// Partial update applied by the page store's mutation operations.
#[derive(Clone, Debug, Default)]
pub(crate) struct PagePatch {
    pub page_title: Option<String>,
    pub link_groups: Option<Vec<LinkGroup>>,
    pub theme: Option<Theme>,
    /// `Some(None)` clears the override.
    pub custom_primary_color: Option<Option<String>>,
}

impl PagePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            page_title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn groups(groups: Vec<LinkGroup>) -> Self {
        Self {
            link_groups: Some(groups),
            ..Default::default()
        }
    }

    pub fn theme(theme: Theme) -> Self {
        Self {
            theme: Some(theme),
            ..Default::default()
        }
    }

    pub fn primary_color(color: Option<String>) -> Self {
        Self {
            custom_primary_color: Some(color),
            ..Default::default()
        }
    }

    pub fn apply_to(self, doc: &mut PageDocument) {
        if let Some(title) = self.page_title {
            doc.page_title = title;
        }
        if let Some(groups) = self.link_groups {
            doc.link_groups = groups;
        }
        if let Some(theme) = self.theme {
            doc.theme = theme;
        }
        if let Some(color) = self.custom_primary_color {
            doc.custom_primary_color = color.filter(|c| !c.trim().is_empty());
        }
    }
}

/// One row of the dashboard listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PageSummary {
    pub hash: String,
    pub title: String,
    pub group_count: usize,
    pub theme: Theme,
    pub custom_primary_color: Option<String>,
    pub last_modified: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_document_uses_camel_case_keys() {
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
            last_modified: Some(42),
        };
        let v = serde_json::to_value(&doc).expect("should serialize");
        assert_eq!(v["pageTitle"], "Work");
        assert_eq!(v["linkGroups"][0]["urls"][0], "github.com");
        assert_eq!(v["theme"], "dark");
        assert_eq!(v["customPrimaryColor"], "#3b82f6");
        assert_eq!(v["lastModified"], 42);
    }

    #[test]
    fn test_page_document_optional_fields_are_omitted() {
        let doc = PageDocument::new_default(Theme::Light);
        let v = serde_json::to_value(&doc).expect("should serialize");
        assert!(v.get("customPrimaryColor").is_none());
        assert!(v.get("lastModified").is_none());
    }

    #[test]
    fn test_stored_page_missing_theme_follows_system() {
        let json = r#"{"pageTitle":"Work","linkGroups":[]}"#;
        let stored: StoredPage = serde_json::from_str(json).expect("should parse");
        assert_eq!(stored.clone().into_document(Theme::Dark).theme, Theme::Dark);
        assert_eq!(stored.into_document(Theme::Light).theme, Theme::Light);

        let json = r#"{"pageTitle":"Work","linkGroups":[],"theme":"light"}"#;
        let stored: StoredPage = serde_json::from_str(json).expect("should parse");
        assert_eq!(stored.into_document(Theme::Dark).theme, Theme::Light);
    }

    #[test]
    fn test_group_fields_are_optional() {
        let json = r#"{"pageTitle":"Work","linkGroups":[{"id":"g1","name":"Dev","urls":["github.com"]},{}]}"#;
        let stored: StoredPage = serde_json::from_str(json).expect("should parse");
        let mut doc = stored.into_document(Theme::Light);

        assert_eq!(doc.link_groups[0].icon, DEFAULT_GROUP_ICON);
        assert_eq!(doc.link_groups[0].urls, vec!["github.com"]);
        assert_eq!(doc.link_groups[1].name, "");
        assert!(doc.link_groups[1].urls.is_empty());

        assert!(doc.fill_missing_group_ids());
        assert_eq!(doc.link_groups[0].id, "g1");
        assert!(!doc.link_groups[1].id.is_empty());
        assert!(!doc.fill_missing_group_ids());
    }

    #[test]
    fn test_new_default_is_empty_default() {
        let doc = PageDocument::new_default(Theme::Dark);
        assert!(doc.is_empty_default());
        assert_eq!(doc.theme, Theme::Dark);

        let mut renamed = doc.clone();
        renamed.page_title = "Mine".to_string();
        assert!(!renamed.is_empty_default());
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut doc = PageDocument::new_default(Theme::Light);
        doc.custom_primary_color = Some("#ff0000".to_string());

        PagePatch::title("Reading").apply_to(&mut doc);
        assert_eq!(doc.page_title, "Reading");
        assert_eq!(doc.custom_primary_color.as_deref(), Some("#ff0000"));

        PagePatch::primary_color(Some("  ".to_string())).apply_to(&mut doc);
        assert!(doc.custom_primary_color.is_none());

        PagePatch::theme(Theme::Dark).apply_to(&mut doc);
        assert_eq!(doc.theme, Theme::Dark);
        assert_eq!(doc.page_title, "Reading");
    }
}
