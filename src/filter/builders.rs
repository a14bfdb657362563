//! Filter builder implementations

use crate::pagination::Filter;
use serde_json::{Map, Value};
use url::form_urlencoded::{byte_serialize, Serializer};

// ============================================================================
// Criteria Filter
// ============================================================================

/// JSON criteria filter, sent as `?criteria={json}`
///
/// Calls accumulate into a single JSON object:
///
/// ```
/// use ethos_client::filter::CriteriaFilter;
///
/// let filter = CriteriaFilter::new()
///     .with_simple_criteria_array("names", "firstName", "Jo")
///     .with_simple_criteria("status", "active");
/// assert_eq!(
///     filter.render(),
///     r#"{"names":[{"firstName":"Jo"}],"status":"active"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaFilter {
    criteria: Map<String, Value>,
}

impl CriteriaFilter {
    /// Create an empty criteria filter
    pub fn new() -> Self {
        Self::default()
    }

    /// `{"key": value}`
    #[must_use]
    pub fn with_simple_criteria(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.criteria.insert(key.into(), value.into());
        self
    }

    /// `{"label": {"key": value}}`
    #[must_use]
    pub fn with_labeled_criteria(
        mut self,
        label: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let mut inner = Map::new();
        inner.insert(key.into(), value.into());
        self.criteria.insert(label.into(), Value::Object(inner));
        self
    }

    /// `{"label": [{"key": value}]}`
    #[must_use]
    pub fn with_simple_criteria_array(
        self,
        label: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let pair: (String, Value) = (key.into(), value.into());
        self.with_criteria_array(label, [pair])
    }

    /// `{"label": [{"k1": v1, "k2": v2, ...}]}`
    #[must_use]
    pub fn with_criteria_array<K, V>(
        mut self,
        label: impl Into<String>,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let object: Map<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.criteria
            .insert(label.into(), Value::Array(vec![Value::Object(object)]));
        self
    }

    /// Check if no criteria were added
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Criteria as a JSON value
    pub fn to_json(&self) -> Value {
        Value::Object(self.criteria.clone())
    }

    /// Criteria as compact JSON text
    pub fn render(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<CriteriaFilter> for Filter {
    fn from(filter: CriteriaFilter) -> Self {
        if filter.is_empty() {
            Filter::None
        } else {
            Filter::Criteria(filter.render())
        }
    }
}

// ============================================================================
// Named Query
// ============================================================================

/// Named query, sent as `?{name}={json}`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedQuery {
    name: String,
    criteria: CriteriaFilter,
}

impl NamedQuery {
    /// Create a named query with no parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            criteria: CriteriaFilter::new(),
        }
    }

    /// Add a parameter to the query body
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.criteria = self.criteria.with_simple_criteria(key, value);
        self
    }

    /// Add a labeled parameter (`{"label": {"key": value}}`)
    #[must_use]
    pub fn with_labeled(
        mut self,
        label: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.criteria = self.criteria.with_labeled_criteria(label, key, value);
        self
    }

    /// Query name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `name={url-encoded json}`
    pub fn render(&self) -> String {
        let body: String = byte_serialize(self.criteria.render().as_bytes()).collect();
        format!("{}={body}", self.name)
    }
}

impl From<NamedQuery> for Filter {
    fn from(query: NamedQuery) -> Self {
        Filter::NamedQuery(query.render())
    }
}

// ============================================================================
// Filter Map
// ============================================================================

/// Simple `key=value` filter parameters, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMap {
    pairs: Vec<(String, String)>,
}

impl FilterMap {
    /// Create an empty filter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Parse `k=v,k2=v2` (the CLI form)
    pub fn parse(spec: &str) -> Self {
        spec.split(',')
            .filter_map(|pair| pair.split_once('='))
            .fold(Self::new(), |map, (k, v)| map.with(k.trim(), v.trim()))
    }

    /// Value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check if the map has no parameters
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `k=v&k2=v2`, url-encoded
    pub fn render(&self) -> String {
        let mut serializer = Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl From<FilterMap> for Filter {
    fn from(map: FilterMap) -> Self {
        if map.is_empty() {
            Filter::None
        } else {
            Filter::FilterMap(map.render())
        }
    }
}
