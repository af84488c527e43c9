//! Scalar coercion helpers
//!
//! Total functions from loosely-typed JSON values to canonical scalars.
//! None of them fail: anything that cannot be coerced comes back as `None`,
//! which callers must read as "unknown", never as zero or empty.

use crate::config::ConversionOptions;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use tracing::warn;
use url::Url;

// Longest leading decimal literal, after optional whitespace
static RE_LEADING_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("Invalid regex")
});

/// Render a JSON number the way it was most likely written.
///
/// Integral values print without a fractional part (`123`, not `123.0`).
pub fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Strings pass through, numbers become their decimal form, anything else is `None`.
pub fn to_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(n)),
        _ => None,
    }
}

/// Like `to_text`, but an empty string also counts as absent
pub fn to_non_empty_text(value: Option<&Value>) -> Option<String> {
    to_text(value).filter(|s| !s.is_empty())
}

/// Finite numbers pass through; strings are parsed from their leading decimal literal.
///
/// `"99.99"` → `99.99`, `"12 kg"` → `12`, `"invalid-price"` → `None`.
pub fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_leading_decimal(s),
        _ => None,
    }
}

fn parse_leading_decimal(s: &str) -> Option<f64> {
    let literal = RE_LEADING_DECIMAL.captures(s)?.get(1)?.as_str();
    literal.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Collapse a JSON-LD `@context` into one display string.
///
/// Strings pass through, lists are joined with `", "`, mappings are
/// rendered as compact JSON with sorted keys.
pub fn collapse_context(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => format_number(n),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        obj @ Value::Object(_) => serde_json::to_string(&sorted_keys(obj)).ok(),
        _ => None,
    }
}

fn sorted_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sorted_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted_keys).collect()),
        other => other.clone(),
    }
}

/// Normalize a URL-bearing field.
///
/// Only strings are considered. Values not starting with `http` are
/// resolved against the configured base URL (when there is one), and
/// everything else is parsed as an absolute URL. A value that cannot be
/// parsed is returned unchanged. `normalizeUrls` is not consulted.
pub fn normalize_url(value: Option<&Value>, options: &ConversionOptions) -> Option<String> {
    let raw = value?.as_str()?;
    let parsed = match options.base_url() {
        Some(base) if !raw.starts_with("http") => Url::parse(base).and_then(|b| b.join(raw)),
        _ => Url::parse(raw),
    };

    match parsed {
        Ok(url) => Some(canonical_url(&url)),
        Err(e) => {
            warn!("Keeping unparseable URL '{}' as-is: {}", raw, e);
            Some(raw.to_string())
        }
    }
}

/// Serialize a parsed URL, dropping the trailing slash of a bare root path.
fn canonical_url(url: &Url) -> String {
    let s = url.as_str();
    let bare_root = url.path() == "/" && url.query().is_none() && url.fragment().is_none();
    match s.strip_suffix('/') {
        Some(trimmed) if bare_root => trimmed.to_string(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(base: Option<&str>) -> ConversionOptions {
        let options = ConversionOptions::default();
        match base {
            Some(b) => options.with_base_url(b),
            None => options,
        }
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(to_text(Some(&json!(123))), Some("123".to_string()));
        assert_eq!(to_text(Some(&json!(1.5))), Some("1.5".to_string()));
        assert_eq!(to_text(Some(&json!(true))), None);
        assert_eq!(to_text(Some(&json!(null))), None);
        assert_eq!(to_text(Some(&json!({"a": 1}))), None);
        assert_eq!(to_text(None), None);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(Some(&json!(500))), Some(500.0));
        assert_eq!(to_number(Some(&json!("99.99"))), Some(99.99));
        assert_eq!(to_number(Some(&json!(" -40.5"))), Some(-40.5));
        assert_eq!(to_number(Some(&json!("12 kg"))), Some(12.0));
        assert_eq!(to_number(Some(&json!("1e3"))), Some(1000.0));
        assert_eq!(to_number(Some(&json!(".5"))), Some(0.5));
        assert_eq!(to_number(Some(&json!("invalid-price"))), None);
        assert_eq!(to_number(Some(&json!(""))), None);
        assert_eq!(to_number(Some(&json!("Infinity"))), None);
        assert_eq!(to_number(Some(&json!("1e999"))), None);
        assert_eq!(to_number(Some(&json!(false))), None);
        assert_eq!(to_number(Some(&json!([1]))), None);
    }

    #[test]
    fn test_collapse_context() {
        assert_eq!(
            collapse_context(Some(&json!("https://schema.org"))),
            Some("https://schema.org".to_string())
        );
        assert_eq!(
            collapse_context(Some(&json!(["https://schema.org", "https://example.com/context"]))),
            Some("https://schema.org, https://example.com/context".to_string())
        );
        assert_eq!(
            collapse_context(Some(&json!({"custom": "https://example.com/vocab#", "@vocab": "https://schema.org/"}))),
            Some(r#"{"@vocab":"https://schema.org/","custom":"https://example.com/vocab#"}"#.to_string())
        );
        assert_eq!(collapse_context(Some(&json!(7))), None);
        assert_eq!(collapse_context(None), None);
    }

    #[test]
    fn test_normalize_relative_url_against_base() {
        let options = opts(Some("https://example.com"));
        assert_eq!(
            normalize_url(Some(&json!("/profile")), &options),
            Some("https://example.com/profile".to_string())
        );
    }

    #[test]
    fn test_absolute_url_is_not_rebased() {
        let options = opts(Some("https://example.com"));
        assert_eq!(
            normalize_url(Some(&json!("https://johndoe.com")), &options),
            Some("https://johndoe.com".to_string())
        );
    }

    #[test]
    fn test_only_root_trailing_slash_is_stripped() {
        let options = opts(None);
        assert_eq!(
            normalize_url(Some(&json!("https://example.com/")), &options),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            normalize_url(Some(&json!("https://example.com/docs/")), &options),
            Some("https://example.com/docs/".to_string())
        );
        assert_eq!(
            normalize_url(Some(&json!("https://example.com/?q=1")), &options),
            Some("https://example.com/?q=1".to_string())
        );
    }

    #[test]
    fn test_unparseable_url_is_kept() {
        let options = opts(None);
        assert_eq!(
            normalize_url(Some(&json!("/relative/without/base")), &options),
            Some("/relative/without/base".to_string())
        );
        assert_eq!(normalize_url(Some(&json!(42)), &options), None);
    }

    #[test]
    fn test_normalize_flag_does_not_skip_resolution() {
        let options = opts(Some("https://example.com")).with_normalize_urls(false);
        assert_eq!(
            normalize_url(Some(&json!("/profile")), &options),
            Some("https://example.com/profile".to_string())
        );
        assert_eq!(
            normalize_url(Some(&json!("https://example.com/")), &options),
            Some("https://example.com".to_string())
        );
    }
}
