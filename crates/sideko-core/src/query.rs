//! Query-string encoding.
//!
//! Every parameter uses the `form` style with `explode=true`: lists repeat the key once
//! per element and objects contribute one pair per property, in insertion order. Omitted
//! and null values produce no pair at all, since a query string has no way to spell
//! null.

use crate::encode::to_json;
use crate::error::Result;
use crate::optional::OptionalValue;
use serde::Serialize;
use serde_json::Value;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Encode a required parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`](crate::Error::Encoding) if the value cannot be
    /// serialized.
    pub fn push<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let value = to_json(value)?;
        self.push_value(key, value);
        Ok(())
    }

    /// Encode an optional parameter, skipping it when not given or null.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`](crate::Error::Encoding) if the value cannot be
    /// serialized.
    pub fn push_opt<T>(&mut self, key: &str, value: &OptionalValue<T>) -> Result<()>
    where
        T: Serialize,
    {
        match value {
            OptionalValue::Value(value) => self.push(key, value),
            OptionalValue::NotGiven | OptionalValue::Null => Ok(()),
        }
    }

    /// Append an already-stringified pair.
    pub fn push_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Append a JSON value using form-explode rules.
    pub fn push_value(&mut self, key: &str, value: Value) {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        self.push_raw(key, text);
                    }
                }
            }
            Value::Object(properties) => {
                for (name, item) in properties {
                    if let Some(text) = scalar_text(item) {
                        self.push_raw(name, text);
                    }
                }
            }
            scalar => {
                if let Some(text) = scalar_text(scalar) {
                    self.push_raw(key, text);
                }
            }
        }
    }

    /// Append every pair from another builder, after the existing ones.
    pub fn extend(&mut self, other: Self) {
        self.pairs.extend(other.pairs);
    }

    /// Borrow the collected pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Text form of a single value. Nested containers fall back to compact JSON.
pub(crate) fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(params: QueryParams) -> Vec<(String, String)> {
        params.into_pairs()
    }

    #[test]
    fn push_opt_skips_not_given_and_null() {
        let mut params = QueryParams::new();
        params
            .push_opt("name", &OptionalValue::<String>::NotGiven)
            .unwrap();
        params.push_opt("page", &OptionalValue::<i64>::Null).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn scalars_stringify_directly() {
        let mut params = QueryParams::new();
        params.push("doc_name", "my-project").unwrap();
        params.push("page", &2).unwrap();
        params
            .push_opt("successful", &OptionalValue::Value(false))
            .unwrap();

        assert_eq!(
            pairs(params),
            vec![
                ("doc_name".to_string(), "my-project".to_string()),
                ("page".to_string(), "2".to_string()),
                ("successful".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn lists_explode_into_repeated_keys_in_order() {
        let mut params = QueryParams::new();
        params.push("tag", &["a", "b"]).unwrap();
        assert_eq!(
            pairs(params),
            vec![
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn null_list_items_are_dropped() {
        let mut params = QueryParams::new();
        params.push_value("id", json!([1, null, 3]));
        assert_eq!(params.pairs().len(), 2);
    }

    #[test]
    fn objects_explode_into_one_pair_per_property() {
        let mut params = QueryParams::new();
        params
            .push("filter", &json!({"limit": 10, "state": "active"}))
            .unwrap();
        assert_eq!(
            pairs(params),
            vec![
                ("limit".to_string(), "10".to_string()),
                ("state".to_string(), "active".to_string()),
            ]
        );
    }

    #[test]
    fn object_properties_keep_insertion_order() {
        let mut params = QueryParams::new();
        params
            .push("filter", &json!({"state": "active", "limit": 10}))
            .unwrap();
        assert_eq!(
            pairs(params),
            vec![
                ("state".to_string(), "active".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn extend_appends_after_existing_pairs() {
        let mut first = QueryParams::new();
        first.push_raw("a", "1");
        let mut second = QueryParams::new();
        second.push_raw("b", "2");
        first.extend(second);
        assert_eq!(first.pairs()[1], ("b".to_string(), "2".to_string()));
    }
}
