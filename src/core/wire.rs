//! Decoding helpers shared by every endpoint family.
//!
//! The members site answers in a few recurring shapes:
//! - plain JSON whose strings are form-encoded (`Jane+Doe`, `1%3A23.4`);
//! - "tabular" JSON: a header `m` mapping short keys to column names and a body `d`
//!   whose rows use the short keys;
//! - HTML pages embedding `var Name = extractJSON('...');` script variables.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::core::{IrError, Page, Record};

static CUSTID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"js_custid\s*=\s*(\d+)\s*;").expect("custid regex"));
static LOGIN_FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<form[^>]*\baction\s*=\s*["'][^"']*\bLogin["']"#).expect("login form regex")
});

/// Lenient JSON decode; `None` for anything that is not JSON (typically the login page).
pub(crate) fn decode_json(text: &str) -> Option<Value> {
    serde_json::from_str(text.trim()).ok()
}

/// Undo the site's form encoding of string values.
pub(crate) fn clean(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

pub(crate) fn clean_value(v: Value) -> Value {
    match v {
        Value::String(s) => Value::String(clean(&s)),
        other => other,
    }
}

/// Numbers on this site arrive as JSON numbers or numeric strings.
pub(crate) fn as_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnyNumber {
    F64(f64),
    Text(String),
}

/// Accepts `12`, `12.5`, `"12.5"` or null.
pub(crate) fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<AnyNumber>::deserialize(deserializer)? {
        Some(AnyNumber::F64(f)) => Some(f),
        Some(AnyNumber::Text(s)) => clean(&s).trim().parse().ok(),
        None => None,
    })
}

/// Like [`de_opt_f64`], rounded to a whole non-negative count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn de_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64(deserializer)?
        .map(f64::round)
        .filter(|f| *f >= 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32))
}

/// Like [`de_opt_f64`] for ids and other 64-bit integers.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn de_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64(deserializer)?
        .filter(|f| f.fract() == 0.0)
        .map(|f| f as i64))
}

/// Strings arrive form-encoded; null stays `None`.
pub(crate) fn de_opt_clean<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| match v {
        Value::String(s) => Some(clean(&s)),
        Value::Null => None,
        other => Some(other.to_string()),
    }))
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// A JSON list endpoint: `null`/empty body means "no rows".
pub(crate) fn rows_from<T>(v: Value, what: &str) -> Result<Vec<T>, IrError>
where
    T: for<'de> Deserialize<'de>,
{
    match v {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        other => serde_json::from_value(other)
            .map_err(|e| IrError::Data(format!("{what} rows: {e}"))),
    }
}

/// The `m` header of a tabular response.
pub(crate) struct ColumnMap<'a> {
    header: &'a Map<String, Value>,
}

impl<'a> ColumnMap<'a> {
    pub(crate) fn from_root(root: &'a Value) -> Result<Self, IrError> {
        let header = root
            .get("m")
            .and_then(Value::as_object)
            .ok_or_else(|| IrError::Data("tabular response without `m` header".into()))?;
        Ok(Self { header })
    }

    /// The short key whose column name is `name`.
    pub(crate) fn key_for(&self, name: &str) -> Option<&'a str> {
        self.header
            .iter()
            .find(|(_, v)| v.as_str() == Some(name))
            .map(|(k, _)| k.as_str())
    }

    /// Rename a short-keyed row to column names, cleaning string values.
    pub(crate) fn name_row(&self, row: &Value) -> Record {
        let mut out = Record::new();
        if let Some(obj) = row.as_object() {
            for (k, v) in obj {
                let name = self
                    .header
                    .get(k)
                    .and_then(Value::as_str)
                    .unwrap_or(k.as_str());
                out.insert(name.to_string(), clean_value(v.clone()));
            }
        }
        out
    }

    pub(crate) fn name_rows(&self, rows: &[Value]) -> Vec<Record> {
        rows.iter().map(|r| self.name_row(r)).collect()
    }

    /// Total match count, stored in `d` under the key whose column is `rowcount`.
    pub(crate) fn rowcount(&self, data: &Value) -> Option<u64> {
        let key = self.key_for("rowcount")?;
        data.get(key).and_then(as_u64)
    }
}

/// Decode `{"m": {...}, "d": {"<rowcount>": N, "r": [...]}}` into a page of named rows.
pub(crate) fn tabular_page(root: &Value) -> Result<Page<Record>, IrError> {
    let columns = ColumnMap::from_root(root)?;
    let data = root
        .get("d")
        .ok_or_else(|| IrError::Data("tabular response without `d` body".into()))?;
    let total = columns.rowcount(data).unwrap_or(0);
    if total == 0 {
        return Ok(Page::empty());
    }
    let rows = data.get("r").and_then(Value::as_array).map_or(&[][..], Vec::as_slice);
    Ok(Page {
        items: columns.name_rows(rows),
        total,
    })
}

/// Payload of the `nth` (1-based) `var <name> = extractJSON('...');` in an HTML page.
pub(crate) fn extract_js_var(html: &str, name: &str, nth: usize) -> Result<Value, IrError> {
    let needle = format!("var {name} = extractJSON('");
    let mut from = 0;
    let mut start = None;
    for _ in 0..nth.max(1) {
        let idx = html[from..]
            .find(&needle)
            .map(|i| from + i)
            .ok_or_else(|| IrError::Data(format!("script variable `{name}` not found")))?;
        start = Some(idx + needle.len());
        from = idx + 1;
    }
    let start = start.ok_or_else(|| IrError::Data(format!("script variable `{name}` not found")))?;
    let len = html[start..]
        .find("');")
        .ok_or_else(|| IrError::Data(format!("script variable `{name}` is unterminated")))?;
    let raw = html[start..start + len].replace('+', " ");
    serde_json::from_str(&raw).map_err(IrError::Json)
}

/// Customer id the membersite writes into every logged-in page.
pub(crate) fn extract_custid(html: &str) -> Option<u64> {
    CUSTID_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// The site answers an expired session with its login form instead of the data.
pub(crate) fn is_login_page(body: &str) -> bool {
    LOGIN_FORM_RE.is_match(body)
}
