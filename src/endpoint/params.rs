use crate::query::join_list;

/// Ordered query-string pairs. Empty values are never pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
        self
    }

    pub fn push_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// `key=a,b,c`; skipped when the list is empty.
    pub fn push_list(&mut self, key: &str, items: &[&str]) -> &mut Self {
        self.push(key, join_list(items))
    }

    /// `key=true`; skipped when the flag is off.
    pub fn push_flag(&mut self, key: &str, flag: bool) -> &mut Self {
        if flag {
            self.push(key, "true");
        }
        self
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
