use serde_json::{Map, Value};

/// Pagination numbers found in an envelope, each optional.
///
/// Read leniently: camelCase and snake_case names, a few aliases, and
/// numeric strings are all accepted. A nested `pagination` object wins over
/// fields next to the items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_count: Option<u64>,
    pub limit: Option<u32>,
}

const CURRENT_PAGE: &[&str] = &["currentPage", "current_page", "page"];
const TOTAL_PAGES: &[&str] = &["totalPages", "total_pages", "pages"];
const TOTAL_COUNT: &[&str] = &["totalCount", "total_count", "total", "totalItems", "count"];
const LIMIT: &[&str] = &["limit", "pageSize", "page_size", "perPage"];

impl PageMeta {
    /// Read metadata from the object that held the items array.
    pub fn from_container(container: &Map<String, Value>) -> Self {
        let outer = Self::from_object(container);
        match container.get("pagination") {
            Some(Value::Object(nested)) => Self::from_object(nested).or(outer),
            _ => outer,
        }
    }

    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            current_page: first_number(object, CURRENT_PAGE).and_then(to_u32),
            total_pages: first_number(object, TOTAL_PAGES).and_then(to_u32),
            total_count: first_number(object, TOTAL_COUNT),
            limit: first_number(object, LIMIT).and_then(to_u32),
        }
    }

    /// Field-wise fallback: keep our values, fill gaps from `other`.
    pub fn or(self, other: Self) -> Self {
        Self {
            current_page: self.current_page.or(other.current_page),
            total_pages: self.total_pages.or(other.total_pages),
            total_count: self.total_count.or(other.total_count),
            limit: self.limit.or(other.limit),
        }
    }
}

fn first_number(object: &Map<String, Value>, names: &[&str]) -> Option<u64> {
    names.iter().find_map(|name| object.get(*name).and_then(as_u64))
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_u32(value: u64) -> Option<u32> {
    u32::try_from(value).ok()
}
