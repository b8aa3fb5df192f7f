use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) const DEFAULT_HASH_LEN: usize = 8;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Turn user-typed link text into something a browser can open.
///
/// Anything that already carries a scheme (or is protocol-relative) is only
/// trimmed; everything else gets `https://` in front. Never fails.
pub(crate) fn normalize_url(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }
    if s.starts_with("//") || has_scheme(s) {
        return s.to_string();
    }
    format!("https://{s}")
}

/// `letter (letter | digit | + | . | -)* :`
fn has_scheme(s: &str) -> bool {
    let Some(colon) = s.find(':') else {
        return false;
    };
    let scheme = &s[..colon];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// Whether a normalized URL looks openable. Web schemes need a host.
pub(crate) fn is_openable_url(url: &str) -> bool {
    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return false;
    }

    let rest = if let Some(r) = url.strip_prefix("//") {
        r
    } else if let Some(r) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        r
    } else {
        // Other schemes (mailto:, tel:, ...) are left to the browser.
        return has_scheme(url) && url.len() > url.find(':').map(|i| i + 1).unwrap_or(0);
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = host.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    !host.is_empty() && !host.starts_with('.') && !host.ends_with('.') && !host.contains("..")
}

/// Splits raw group URLs into normalized openable links and the raw entries
/// that had to be skipped. Blank entries are dropped silently.
pub(crate) fn classify_links(urls: &[String]) -> (Vec<String>, Vec<String>) {
    let mut ok = Vec::new();
    let mut invalid = Vec::new();
    for raw in urls {
        let url = normalize_url(raw);
        if url.is_empty() {
            continue;
        }
        if is_openable_url(&url) {
            ok.push(url);
        } else {
            invalid.push(raw.clone());
        }
    }
    (ok, invalid)
}

static COUNTER: AtomicUsize = AtomicUsize::new(1);

fn fallback_seed() -> u64 {
    let mut hasher = DefaultHasher::new();
    COUNTER.fetch_add(1, Ordering::SeqCst).hash(&mut hasher);
    now_ms().hash(&mut hasher);
    hasher.finish()
}

/// Short base-36 identifier. Not unique and not meant to be unguessable.
pub(crate) fn generate_hash(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    if getrandom::getrandom(&mut bytes).is_err() {
        let mut seed = fallback_seed();
        for b in bytes.iter_mut() {
            *b = (seed & 0xff) as u8;
            seed = seed.rotate_right(8) ^ 0x9e37_79b9_7f4a_7c15;
        }
    }

    bytes
        .into_iter()
        .map(|b| BASE36[(b % 36) as usize] as char)
        .collect()
}

pub(crate) fn new_page_hash() -> String {
    generate_hash(DEFAULT_HASH_LEN)
}

pub(crate) fn new_group_id() -> String {
    format!("g{}{}", now_ms(), generate_hash(4))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Hsl {
    /// Degrees, 0..360.
    pub h: f64,
    /// Percent, 0..=100.
    pub s: f64,
    /// Percent, 0..=100.
    pub l: f64,
}

/// CSS custom-property form: `217 91% 60%`.
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}% {}%",
            self.h.round(),
            self.s.round(),
            self.l.round()
        )
    }
}

/// Parses `#rrggbb` or `#rgb` (the `#` is optional).
pub(crate) fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    let h = hex.trim().trim_start_matches('#');
    let expanded: String = match h.len() {
        3 => h.chars().flat_map(|c| [c, c]).collect(),
        6 => h.to_string(),
        _ => return None,
    };
    if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| -> Option<f64> {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .ok()
            .map(|v| v as f64 / 255.0)
    };
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < f64::EPSILON {
        return Some(Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        });
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Some(Hsl {
        h: h * 60.0,
        s: s * 100.0,
        l: l * 100.0,
    })
}

/// Move the element at `from` so it ends up at index `to`.
/// Out-of-range indices leave the slice untouched.
pub(crate) fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_examples() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://x.com"), "http://x.com");
        assert_eq!(normalize_url("https://x.com/a?b=c"), "https://x.com/a?b=c");
        assert_eq!(normalize_url("mailto:a@b.com"), "mailto:a@b.com");
        assert_eq!(normalize_url("//cdn.example.com/x"), "//cdn.example.com/x");
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn test_normalize_url_scheme_shapes() {
        assert_eq!(normalize_url("svn+ssh://host/repo"), "svn+ssh://host/repo");
        assert_eq!(normalize_url("tel:+123"), "tel:+123");
        // A leading digit is not a scheme.
        assert_eq!(normalize_url("1abc:foo"), "https://1abc:foo");
        // Host with port is a scheme-looking prefix and stays untouched.
        assert_eq!(normalize_url("localhost:8080"), "localhost:8080");
    }

    #[test]
    fn test_normalize_url_is_idempotent() {
        let inputs = [
            "example.com",
            "http://x.com",
            "mailto:a@b.com",
            "",
            "  spaced.org/path ",
            "//proto.rel",
            "1abc:foo",
            "a b c",
        ];
        for x in inputs {
            let once = normalize_url(x);
            assert_eq!(normalize_url(&once), once, "not idempotent for {x:?}");
        }
    }

    #[test]
    fn test_classify_links_skips_invalid_entries() {
        let urls = vec![
            "github.com".to_string(),
            "not a url".to_string(),
            "".to_string(),
            "mailto:a@b.com".to_string(),
            "https://".to_string(),
        ];
        let (ok, invalid) = classify_links(&urls);
        assert_eq!(ok, vec!["https://github.com", "mailto:a@b.com"]);
        assert_eq!(invalid, vec!["not a url", "https://"]);
    }

    #[test]
    fn test_generate_hash_uses_base36_alphabet() {
        let h = generate_hash(DEFAULT_HASH_LEN);
        assert_eq!(h.len(), 8);
        assert!(h.bytes().all(|b| BASE36.contains(&b)));
        assert_eq!(generate_hash(12).len(), 12);
        assert_eq!(generate_hash(0), "");
    }

    #[test]
    fn test_hex_to_hsl() {
        let red = hex_to_hsl("#ff0000").expect("valid");
        assert_eq!(red.to_string(), "0 100% 50%");

        let blue = hex_to_hsl("3b82f6").expect("valid");
        assert_eq!(blue.to_string(), "217 91% 60%");

        let white = hex_to_hsl("#fff").expect("valid");
        assert_eq!(white.to_string(), "0 0% 100%");

        assert!(hex_to_hsl("#12345").is_none());
        assert!(hex_to_hsl("#zzzzzz").is_none());
        assert!(hex_to_hsl("").is_none());
    }

    #[test]
    fn test_move_item() {
        let mut v = vec!["a", "b", "c", "d"];
        move_item(&mut v, 0, 2);
        assert_eq!(v, vec!["b", "c", "a", "d"]);
        move_item(&mut v, 3, 0);
        assert_eq!(v, vec!["d", "b", "c", "a"]);
        move_item(&mut v, 9, 0);
        assert_eq!(v, vec!["d", "b", "c", "a"]);
    }
}
