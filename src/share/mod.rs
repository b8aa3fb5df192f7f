use crate::models::{LinkGroup, PageDocument, Theme, DEFAULT_PAGE_TITLE};
use serde::{Deserialize, Serialize};

pub(crate) const SHARED_DATA_PARAM: &str = "sharedData";
pub(crate) const OPEN_GROUP_PARAM: &str = "openGroupInNewWindow";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ShareError {
    #[error("the link does not contain shared page data")]
    MissingPayload,

    #[error("shared page data is not valid percent-encoding: {0}")]
    Decode(String),

    #[error("shared page data is not a valid page: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Wire form of a shared page: the document without `lastModified`.
///
/// Every field is optional on the way in so that hand-trimmed payloads still
/// import.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SharedPage {
    #[serde(default = "default_title")]
    pub page_title: String,
    #[serde(default)]
    pub link_groups: Vec<LinkGroup>,
    /// Absent means "follow the viewer's OS preference".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_primary_color: Option<String>,
}

fn default_title() -> String {
    DEFAULT_PAGE_TITLE.to_string()
}

impl From<&PageDocument> for SharedPage {
    fn from(doc: &PageDocument) -> Self {
        Self {
            page_title: doc.page_title.clone(),
            link_groups: doc.link_groups.clone(),
            theme: Some(doc.theme),
            custom_primary_color: doc.custom_primary_color.clone(),
        }
    }
}

impl SharedPage {
    /// Unsaved preview document; it has no hash until the page store
    /// materializes it.
    pub fn into_document(self, system_theme: Theme) -> PageDocument {
        let mut document = PageDocument {
            page_title: self.page_title,
            link_groups: self.link_groups,
            theme: self.theme.unwrap_or(system_theme),
            custom_primary_color: self.custom_primary_color,
            last_modified: None,
        };
        document.fill_missing_group_ids();
        document
    }
}

/// JSON-encode and percent-encode a page for a `sharedData` parameter.
pub(crate) fn encode_shared_data(doc: &PageDocument) -> Result<String, ShareError> {
    let json = serde_json::to_string(&SharedPage::from(doc))?;
    Ok(urlencoding::encode(&json).into_owned())
}

/// Inverse of [`encode_shared_data`], taking the raw (still encoded) value.
pub(crate) fn decode_shared_data(raw: &str) -> Result<SharedPage, ShareError> {
    if raw.trim().is_empty() {
        return Err(ShareError::MissingPayload);
    }
    // Query strings may carry `+` for spaces.
    let raw = raw.replace('+', "%20");
    let json = urlencoding::decode(&raw).map_err(|e| ShareError::Decode(e.to_string()))?;
    Ok(serde_json::from_str(&json)?)
}

/// Dashboard-style link: `<origin>/?sharedData=...#<hash>`.
pub(crate) fn share_url(
    origin: &str,
    hash: &str,
    doc: &PageDocument,
) -> Result<String, ShareError> {
    let payload = encode_shared_data(doc)?;
    Ok(format!("{origin}/?{SHARED_DATA_PARAM}={payload}#{hash}"))
}

/// Import-route link: `<origin>/import?sharedData=...`.
pub(crate) fn import_url(origin: &str, doc: &PageDocument) -> Result<String, ShareError> {
    let payload = encode_shared_data(doc)?;
    Ok(format!("{origin}/import?{SHARED_DATA_PARAM}={payload}"))
}

/// Raw value of `name` in a `?a=b&c=d` search string, without decoding.
pub(crate) fn raw_query_param<'a>(search: &'a str, name: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

/// `search` with `names` removed, including the leading `?` when anything is
/// left.
pub(crate) fn strip_query_params(search: &str, names: &[&str]) -> String {
    let kept: Vec<&str> = search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair: &&str| {
            let key = pair.split_once('=').map(|(k, _)| k).unwrap_or(*pair);
            !names.contains(&key)
        })
        .collect();
    if kept.is_empty() {
        String::new()
    } else {
        format!("?{}", kept.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_GROUP_ICON;

    fn work_page() -> PageDocument {
        PageDocument {
            page_title: "Work & Play?".to_string(),
            link_groups: vec![LinkGroup {
                id: "g1".to_string(),
                name: "Dev".to_string(),
                icon: "Code".to_string(),
                urls: vec![
                    "github.com".to_string(),
                    "https://x.com/?a=1&b=2#h".to_string(),
                ],
            }],
            theme: Theme::Dark,
            custom_primary_color: Some("#3b82f6".to_string()),
            last_modified: Some(1_700_000_000_000),
        }
    }

    #[test]
    fn test_export_import_drops_only_last_modified() {
        let doc = work_page();
        let encoded = encode_shared_data(&doc).expect("encode");
        assert!(!encoded.contains('&'));
        assert!(!encoded.contains('#'));
        assert!(!encoded.contains("lastModified"));

        let decoded = decode_shared_data(&encoded)
            .expect("decode")
            .into_document(Theme::Light);
        let mut expected = doc.clone();
        expected.last_modified = None;
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_share_url_shapes() {
        let doc = work_page();
        let url = share_url("https://app.test", "abc123", &doc).expect("share url");
        assert!(url.starts_with("https://app.test/?sharedData="));
        assert!(url.ends_with("#abc123"));

        let url = import_url("https://app.test", &doc).expect("import url");
        assert!(url.starts_with("https://app.test/import?sharedData="));

        let search = &url["https://app.test/import".len()..];
        let raw = raw_query_param(search, SHARED_DATA_PARAM).expect("param present");
        assert_eq!(decode_shared_data(raw).expect("decode").page_title, "Work & Play?");
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_shared_data(""), Err(ShareError::MissingPayload)));
        assert!(matches!(decode_shared_data("%7Bnope"), Err(ShareError::Parse(_))));
        assert!(matches!(decode_shared_data("%FF%FE"), Err(ShareError::Decode(_))));
    }

    #[test]
    fn test_decode_accepts_partial_documents() {
        let raw = urlencoding::encode(r#"{"linkGroups":[]}"#).into_owned();
        let page = decode_shared_data(&raw).expect("decode");
        assert_eq!(page.page_title, DEFAULT_PAGE_TITLE);
        assert_eq!(page.theme, None);
        assert!(page.link_groups.is_empty());
        assert_eq!(page.into_document(Theme::Dark).theme, Theme::Dark);
    }

    #[test]
    fn test_decode_accepts_groups_without_icon_or_id() {
        let raw = urlencoding::encode(
            r#"{"pageTitle":"Work","linkGroups":[{"name":"Dev","urls":["github.com"]}],"theme":"dark"}"#,
        )
        .into_owned();
        let doc = decode_shared_data(&raw)
            .expect("decode")
            .into_document(Theme::Light);

        assert_eq!(doc.theme, Theme::Dark);
        assert_eq!(doc.link_groups.len(), 1);
        assert_eq!(doc.link_groups[0].icon, DEFAULT_GROUP_ICON);
        assert!(!doc.link_groups[0].id.is_empty());
        assert_eq!(doc.link_groups[0].urls, vec!["github.com"]);
    }

    #[test]
    fn test_query_helpers() {
        let search = "?sharedData=abc&openGroupInNewWindow=g1&x=1";
        assert_eq!(raw_query_param(search, "sharedData"), Some("abc"));
        assert_eq!(raw_query_param(search, OPEN_GROUP_PARAM), Some("g1"));
        assert_eq!(raw_query_param(search, "missing"), None);

        assert_eq!(
            strip_query_params(search, &[SHARED_DATA_PARAM]),
            "?openGroupInNewWindow=g1&x=1"
        );
        assert_eq!(
            strip_query_params(search, &[SHARED_DATA_PARAM, OPEN_GROUP_PARAM, "x"]),
            ""
        );
        assert_eq!(strip_query_params("", &[SHARED_DATA_PARAM]), "");
    }
}
