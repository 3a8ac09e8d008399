//! Search parameters and paginated results

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Items per page when none (or a non-positive amount) is requested
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `asc` / `desc` in any case; any other non-empty text reads as `Desc`
    fn normalize(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, possibly malformed search input
///
/// Every field accepts any JSON value so that query strings, request bodies
/// and hand-built inputs all go through the same normalization.
///
/// # Example
/// ```rust,ignore
/// let params = SearchParams::new(SearchProps {
///     page: Some(json!(2)),
///     per_page: Some(json!("10")),
///     sort: Some(json!("name")),
///     sort_dir: Some(json!("ASC")),
///     filter: Some(json!("john")),
/// });
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchProps {
    pub page: Option<Value>,
    pub per_page: Option<Value>,
    pub sort: Option<Value>,
    pub sort_dir: Option<Value>,
    pub filter: Option<Value>,
}

/// Normalized search directives
///
/// Construction never fails: invalid values fall back to defaults.
/// - `page` ≥ 1, fractional input truncated
/// - `per_page` ≥ 1, defaulting to [`DEFAULT_PER_PAGE`]
/// - `sort` is `None` for empty input
/// - `sort_dir` is only set when `sort` is, and unknown directions mean `Desc`
/// - `filter` is `None` for empty or falsy input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl SearchParams {
    pub fn new(props: SearchProps) -> Self {
        Self::with_defaults(props, DEFAULT_PER_PAGE, None)
    }

    /// Normalize using a custom default page size and an optional cap
    pub fn with_defaults(props: SearchProps, default_per_page: u64, max_per_page: Option<u64>) -> Self {
        let default_per_page = default_per_page.max(1);
        let mut per_page = positive_integer(props.per_page.as_ref()).unwrap_or(default_per_page);
        if let Some(max) = max_per_page {
            per_page = per_page.min(max.max(1));
        }

        let sort = text(props.sort.as_ref()).filter(|s| !s.is_empty());
        let sort_dir = match &sort {
            Some(_) => Some(SortDirection::normalize(
                &text(props.sort_dir.as_ref()).unwrap_or_default(),
            )),
            None => None,
        };

        Self {
            page: positive_integer(props.page.as_ref()).unwrap_or(1),
            per_page,
            sort,
            sort_dir,
            filter: filter_text(props.filter.as_ref()),
        }
    }

    /// Parse raw JSON input; anything that is not an object yields defaults
    pub fn from_json(raw: Value) -> Self {
        Self::new(serde_json::from_value(raw).unwrap_or_default())
    }

    /// Current page number (starts at 1)
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Number of items per page
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Zero-based index of the first item on the requested page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(SearchProps::default())
    }
}

/// Numbers and numeric strings truncated toward zero; `None` unless ≥ 1
fn positive_integer(value: Option<&Value>) -> Option<u64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if number.is_finite() && number >= 1.0 {
        Some(number.trunc() as u64)
    } else {
        None
    }
}

/// Text form of a raw value; `null` has none
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Text form of a filter value; empty, `false` and `0` are treated as absent
fn filter_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => text(Some(other)).filter(|s| !s.is_empty()),
    }
}

/// Constructor input for [`SearchResult`]
#[derive(Debug, Clone)]
pub struct SearchResultProps<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub sort: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub filter: Option<String>,
}

/// One page of search output plus pagination metadata
///
/// `last_page` is derived as `ceil(total / per_page)`, so an empty result has
/// `last_page == 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    items: Vec<T>,
    total: u64,
    current_page: u64,
    per_page: u64,
    last_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl<T> SearchResult<T> {
    pub fn new(props: SearchResultProps<T>) -> Self {
        // Ensure per_page is at least 1 to avoid division by zero
        let per_page = props.per_page.max(1);

        Self {
            items: props.items,
            total: props.total,
            current_page: props.current_page,
            per_page,
            last_page: props.total.div_ceil(per_page),
            sort: props.sort,
            sort_dir: props.sort_dir,
            filter: props.filter,
        }
    }

    /// The returned page
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of matching items before pagination
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn last_page(&self) -> u64 {
        self.last_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Whether a page follows the current one
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Whether a page precedes the current one
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}
