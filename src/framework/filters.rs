//! # Schema-Derived Filter Builder
//!
//! At controller construction time a [`FilterSet`] is derived from the resource's
//! [`Schema`]: every scalar field except the ones the schema hides from search
//! becomes a filterable query parameter. Nested objects and lists are never
//! filterable. The set is also published as a list of
//! [`ParamSpec`]s so the hosting layer can advertise the parameters it accepts.
//!
//! On each list request, [`FilterSet::extract`] turns raw query parameters into a
//! [`FilterRequest`]:
//!
//! - keys outside the filterable set (including excluded fields) are dropped silently;
//! - values are coerced to the field's declared kind;
//! - textual values match by case-insensitive substring, everything else by
//!   exact equality.

use crate::framework::error::FrameworkError;
use crate::framework::query::{Filter, Lookup};
use crate::framework::schema::{FieldKind, FieldSpec, Schema};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// A declared query parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: String,
}

/// Caller-supplied filters for one list request, in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRequest {
    filters: Vec<Filter>,
}

impl FilterRequest {
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// True when the record's field map satisfies every filter.
    pub fn matches(&self, row: &Map<String, Value>) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    fn push(&mut self, field: &str, value: Value) {
        let lookup = if value.is_string() {
            Lookup::IContains
        } else {
            Lookup::Exact
        };
        self.filters.push(Filter::new(field, lookup, value));
    }
}

/// The filterable surface of one resource.
#[derive(Debug, Clone)]
pub struct FilterSet {
    fields: Vec<FieldSpec>,
}

impl FilterSet {
    pub fn derive(schema: &Schema) -> Self {
        let fields = schema
            .fields()
            .iter()
            .filter(|f| !schema.is_excluded(f.name))
            .filter(|f| !matches!(f.kind, FieldKind::Object | FieldKind::List))
            .copied()
            .collect();
        Self { fields }
    }

    pub fn is_filterable(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn params(&self) -> Vec<ParamSpec> {
        self.fields
            .iter()
            .map(|f| ParamSpec {
                name: f.name,
                kind: f.kind,
                description: format!("Filter by {}", f.name),
            })
            .collect()
    }

    /// Builds the filter request for one list call from raw query parameters.
    ///
    /// Fails with [`FrameworkError::ValidationError`] when a filterable value cannot be
    /// coerced to its field's kind.
    pub fn extract(&self, query: &[(String, String)]) -> Result<FilterRequest, FrameworkError> {
        let mut request = FilterRequest::default();
        for (key, raw) in query {
            let Some(field) = self.fields.iter().find(|f| f.name == key) else {
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            let value = field.kind.coerce(raw).map_err(|e| {
                FrameworkError::ValidationError(format!("Invalid value for filter '{key}': {e}"))
            })?;
            request.push(field.name, value);
        }
        debug!(filters = request.filters.len(), "Filters extracted");
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new(
            "account",
            &[
                FieldSpec::new("name", FieldKind::Text),
                FieldSpec::new("password", FieldKind::Text),
                FieldSpec::new("age", FieldKind::Integer),
                FieldSpec::new("is_active", FieldKind::Boolean),
            ],
        )
        .exclude_from_search(&["password"])
    }

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn excluded_fields_are_not_filterable() {
        let set = FilterSet::derive(&schema());
        assert_eq!(set.field_names(), vec!["id", "uuid", "name", "age", "is_active"]);
        assert!(!set.is_filterable("password"));
        assert_eq!(set.params()[2].description, "Filter by name");
    }

    #[test]
    fn nested_fields_are_not_filterable() {
        let schema = Schema::new(
            "basket",
            &[
                FieldSpec::new("owner", FieldKind::Text),
                FieldSpec::new("product", FieldKind::Object),
                FieldSpec::new("items", FieldKind::List),
            ],
        );
        let set = FilterSet::derive(&schema);
        assert_eq!(set.field_names(), vec!["id", "uuid", "owner"]);
        assert!(set.params().iter().all(|p| p.name != "product"));

        let request = set
            .extract(&query(&[("product", "phone"), ("items", "x")]))
            .unwrap();
        assert!(request.is_empty());
    }

    #[test]
    fn unknown_and_excluded_params_are_dropped() {
        let set = FilterSet::derive(&schema());
        let request = set
            .extract(&query(&[("password", "hunter2"), ("page", "2"), ("name", "")]))
            .unwrap();
        assert!(request.is_empty());
    }

    #[test]
    fn values_are_coerced_to_field_kind() {
        let set = FilterSet::derive(&schema());
        let request = set
            .extract(&query(&[("age", "30"), ("is_active", "false"), ("name", "AL")]))
            .unwrap();
        let filters = request.filters();
        assert_eq!(filters[0], Filter::new("age", Lookup::Exact, json!(30)));
        assert_eq!(filters[1], Filter::new("is_active", Lookup::Exact, json!(false)));
        assert_eq!(filters[2], Filter::new("name", Lookup::IContains, json!("AL")));
    }

    #[test]
    fn uncoercible_value_is_a_validation_error() {
        let set = FilterSet::derive(&schema());
        let err = set.extract(&query(&[("age", "thirty")])).unwrap_err();
        assert!(matches!(err, FrameworkError::ValidationError(_)));
    }

    #[test]
    fn text_matches_by_substring_and_numbers_exactly() {
        let set = FilterSet::derive(&schema());
        let request = set.extract(&query(&[("name", "ali"), ("age", "30")])).unwrap();

        assert!(request.matches(&row(json!({"name": "Alice", "age": 30}))));
        assert!(!request.matches(&row(json!({"name": "Alice", "age": 31}))));
        assert!(!request.matches(&row(json!({"name": "Bob", "age": 30}))));

        let by_age = set.extract(&query(&[("age", "3")])).unwrap();
        assert!(!by_age.matches(&row(json!({"age": 30}))));
    }
}
