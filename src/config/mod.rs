use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    /// Origin used when building share and import links.
    /// `None` means "use the current location's origin".
    pub share_base_url: Option<String>,
    pub log_level: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut config = Self::default();

        // Deployments can inject `window.ENV = { SHARE_BASE_URL, LOG_LEVEL }`.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(v) = js_sys::Reflect::get(&env, &"SHARE_BASE_URL".into()) {
                        if let Some(s) = v.as_string() {
                            config.share_base_url = Some(s);
                        }
                    }
                    if let Ok(v) = js_sys::Reflect::get(&env, &"LOG_LEVEL".into()) {
                        if let Some(s) = v.as_string() {
                            config.log_level = s;
                        }
                    }
                }
            }
        }

        config
    }

    pub fn log_level(&self) -> log::Level {
        parse_log_level(&self.log_level)
    }

    /// Share base without a trailing slash.
    pub fn share_origin(&self) -> String {
        let base = self
            .share_base_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| web_sys::window().and_then(|w| w.location().origin().ok()))
            .unwrap_or_default();
        base.trim().trim_end_matches('/').to_string()
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            share_base_url: None,
            log_level: "info".to_string(),
        }
    }
}

pub(crate) fn parse_log_level(s: &str) -> log::Level {
    match s.trim().to_ascii_lowercase().as_str() {
        "error" => log::Level::Error,
        "warn" | "warning" => log::Level::Warn,
        "debug" => log::Level::Debug,
        "trace" => log::Level::Trace,
        _ => log::Level::Info,
    }
}
