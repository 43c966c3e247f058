use std::collections::{BTreeMap, HashMap};

/// "People also search for" lookup, keyed by query.
#[derive(Clone, Debug, Default)]
pub struct RelatedSearches {
    fallback_query: String,
    by_query: HashMap<String, Vec<String>>,
}

fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

impl RelatedSearches {
    pub fn new(fallback_query: &str, table: &BTreeMap<String, Vec<String>>) -> Self {
        let by_query = table
            .iter()
            .map(|(query, related)| (normalize_query(query), related.clone()))
            .collect();
        Self {
            fallback_query: fallback_query.to_string(),
            by_query,
        }
    }

    /// An empty query looks up the fallback query instead. Unknown queries
    /// have no related searches.
    pub fn lookup(&self, query: &str) -> &[String] {
        let key = if query.trim().is_empty() {
            normalize_query(&self.fallback_query)
        } else {
            normalize_query(query)
        };
        self.by_query
            .get(&key)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
