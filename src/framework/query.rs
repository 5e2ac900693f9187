//! # Lookup/Query Engine
//!
//! An in-memory query helper over a homogeneous slice of records. Records are
//! inspected through their serde representation, so any `Serialize` type can be
//! queried by field name without per-type glue.
//!
//! Filter keys take the form `field__lookup`; the lookup defaults to `exact`:
//!
//! ```rust
//! use fakedata_api::framework::query::{Filter, QuerySet};
//! use serde_json::json;
//!
//! let rows = vec![json!({"name": "Alice", "age": 31}), json!({"name": "bob", "age": 17})];
//! let adults = QuerySet::new(&rows)
//!     .filter(&[Filter::parse("age__gte", json!(18)).unwrap()])
//!     .unwrap();
//! assert_eq!(adults.count(), 1);
//! ```
//!
//! Every operation returns a new view; the source slice is never mutated.

use crate::framework::error::FrameworkError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A named comparison operator applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Exact,
    Lt,
    Lte,
    Gt,
    Gte,
    /// Case-insensitive substring match. False for non-textual values.
    IContains,
    /// Membership in a supplied set.
    In,
}

impl FromStr for Lookup {
    type Err = FrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Lookup::Exact),
            "lt" => Ok(Lookup::Lt),
            "lte" => Ok(Lookup::Lte),
            "gt" => Ok(Lookup::Gt),
            "gte" => Ok(Lookup::Gte),
            "icontains" => Ok(Lookup::IContains),
            "in" => Ok(Lookup::In),
            other => Err(FrameworkError::UnsupportedLookup(other.to_string())),
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lookup::Exact => "exact",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::IContains => "icontains",
            Lookup::In => "in",
        };
        f.write_str(name)
    }
}

impl Lookup {
    /// Evaluates `actual <lookup> expected`.
    pub fn evaluate(&self, actual: &Value, expected: &Value) -> bool {
        match self {
            Lookup::Exact => values_equal(actual, expected),
            Lookup::Lt => compare(actual, expected) == Some(Ordering::Less),
            Lookup::Lte => matches!(
                compare(actual, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Lookup::Gt => compare(actual, expected) == Some(Ordering::Greater),
            Lookup::Gte => matches!(
                compare(actual, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Lookup::IContains => match (actual, expected) {
                (Value::String(haystack), Value::String(needle)) => {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
            Lookup::In => match expected {
                Value::Array(candidates) => candidates.iter().any(|c| values_equal(actual, c)),
                single => values_equal(actual, single),
            },
        }
    }
}

/// Splits `field__lookup` into its parts. Keys without `__` use `exact`.
pub fn parse_lookup(key: &str) -> (&str, &str) {
    key.split_once("__").unwrap_or((key, "exact"))
}

/// One field-level predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub lookup: Lookup,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, lookup: Lookup, value: Value) -> Self {
        Self {
            field: field.into(),
            lookup,
            value,
        }
    }

    /// Builds a filter from a `field__lookup` key.
    pub fn parse(key: &str, value: Value) -> Result<Self, FrameworkError> {
        let (field, lookup) = parse_lookup(key);
        Ok(Self::new(field, lookup.parse()?, value))
    }

    pub fn matches(&self, row: &Map<String, Value>) -> bool {
        let actual = row.get(&self.field).unwrap_or(&Value::Null);
        self.lookup.evaluate(actual, &self.value)
    }
}

/// Equality with numbers compared by value, so `1` equals `1.0`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Partial ordering between two JSON values of the same kind.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

// Total order used for sorting: values of different kinds sort by kind.
fn sort_order(a: &Value, b: &Value) -> Ordering {
    compare(a, b).unwrap_or_else(|| kind_rank(a).cmp(&kind_rank(b)))
}

/// Serializes a record into its field map. Non-object records yield an empty map.
pub fn to_row<T: Serialize>(record: &T) -> Map<String, Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// A read-only view over borrowed records.
#[derive(Debug)]
pub struct QuerySet<'a, T> {
    items: Vec<&'a T>,
}

impl<'a, T> Clone for QuerySet<'a, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<'a, T: Serialize> QuerySet<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items: items.iter().collect(),
        }
    }

    /// Keeps the records matching **every** filter.
    pub fn filter(&self, filters: &[Filter]) -> Result<Self, FrameworkError> {
        Ok(self.retain_rows(|row| filters.iter().all(|f| f.matches(row))))
    }

    /// Like [`QuerySet::filter`], parsing `field__lookup` keys first.
    ///
    /// Fails with [`FrameworkError::UnsupportedLookup`] on unknown suffixes.
    pub fn filter_by(&self, predicates: &[(&str, Value)]) -> Result<Self, FrameworkError> {
        let filters = parse_all(predicates)?;
        self.filter(&filters)
    }

    /// Drops the records matching every filter.
    pub fn exclude(&self, filters: &[Filter]) -> Self {
        self.retain_rows(|row| !filters.iter().all(|f| f.matches(row)))
    }

    /// Keeps the records for which `predicate` holds on their field map.
    pub fn retain_rows(&self, predicate: impl Fn(&Map<String, Value>) -> bool) -> Self {
        let items = self
            .items
            .iter()
            .copied()
            .filter(|item| predicate(&to_row(*item)))
            .collect();
        Self { items }
    }

    /// Stable multi-key sort. A leading `-` reverses that key.
    pub fn order_by(&self, fields: &[&str]) -> Self {
        let keys: Vec<(&str, bool)> = fields
            .iter()
            .map(|f| match f.strip_prefix('-') {
                Some(name) => (name, true),
                None => (*f, false),
            })
            .collect();

        let mut keyed: Vec<(Vec<Value>, &'a T)> = self
            .items
            .iter()
            .map(|item| {
                let row = to_row(*item);
                let values = keys
                    .iter()
                    .map(|(name, _)| row.get(*name).cloned().unwrap_or(Value::Null))
                    .collect();
                (values, *item)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| {
            for (i, (_, descending)) in keys.iter().enumerate() {
                let ordering = sort_order(&a[i], &b[i]);
                let ordering = if *descending { ordering.reverse() } else { ordering };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        Self {
            items: keyed.into_iter().map(|(_, item)| item).collect(),
        }
    }

    /// Returns exactly one record matching the filters.
    pub fn get(&self, filters: &[Filter]) -> Result<&'a T, FrameworkError> {
        let matches = self.filter(filters)?;
        match matches.items.as_slice() {
            [] => Err(FrameworkError::NotFound(format!(
                "No record found for {}",
                describe(filters)
            ))),
            [single] => Ok(*single),
            _ => Err(FrameworkError::AmbiguousResult(format!(
                "Multiple records found for {}",
                describe(filters)
            ))),
        }
    }

    /// First record matching the filters, if any.
    pub fn get_or_none(&self, filters: &[Filter]) -> Option<&'a T> {
        self.filter(filters).ok()?.first()
    }

    /// Projects every record onto `fields`, skipping fields a record lacks.
    pub fn values(&self, fields: &[&str]) -> Vec<Map<String, Value>> {
        self.items
            .iter()
            .map(|item| {
                let row = to_row(*item);
                fields
                    .iter()
                    .filter_map(|f| row.get(*f).map(|v| (f.to_string(), v.clone())))
                    .collect()
            })
            .collect()
    }

    /// Values of a single field, `Null` where absent.
    pub fn values_flat(&self, field: &str) -> Vec<Value> {
        self.items
            .iter()
            .map(|item| to_row(*item).remove(field).unwrap_or(Value::Null))
            .collect()
    }
}

impl<'a, T> QuerySet<'a, T> {
    /// Returns the slice `[(page-1)*page_size, page*page_size)`.
    ///
    /// Pages past the end yield an empty view.
    pub fn paginate(&self, page: usize, page_size: usize) -> Self {
        let start = page
            .saturating_sub(1)
            .checked_mul(page_size)
            .unwrap_or(usize::MAX);
        let items = self.items.iter().copied().skip(start).take(page_size).collect();
        Self { items }
    }

    pub fn first(&self) -> Option<&'a T> {
        self.items.first().copied()
    }

    pub fn last(&self) -> Option<&'a T> {
        self.items.last().copied()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn exists(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn all(&self) -> &[&'a T] {
        &self.items
    }
}

impl<'a, T: Clone> QuerySet<'a, T> {
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_iter().cloned().collect()
    }
}

fn parse_all(predicates: &[(&str, Value)]) -> Result<Vec<Filter>, FrameworkError> {
    predicates
        .iter()
        .map(|(key, value)| Filter::parse(key, value.clone()))
        .collect()
}

fn describe(filters: &[Filter]) -> String {
    let parts: Vec<String> = filters
        .iter()
        .map(|f| format!("{}__{}={}", f.field, f.lookup, f.value))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Alice", "age": 31, "city": "Paris"}),
            json!({"id": 2, "name": "bob", "age": 17, "city": "Lyon"}),
            json!({"id": 3, "name": "Carol", "age": 31, "city": "Nice"}),
            json!({"id": 4, "name": "alina", "age": 45, "city": "Paris"}),
        ]
    }

    fn ids(qs: &QuerySet<'_, Value>) -> Vec<i64> {
        qs.all().iter().map(|v| v["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn parse_lookup_defaults_to_exact() {
        assert_eq!(parse_lookup("age"), ("age", "exact"));
        assert_eq!(parse_lookup("age__gte"), ("age", "gte"));
        assert_eq!(parse_lookup("a__b__c"), ("a", "b__c"));
    }

    #[test]
    fn comparison_lookups() {
        let rows = people();
        let qs = QuerySet::new(&rows);
        assert_eq!(ids(&qs.filter_by(&[("age__lt", json!(31))]).unwrap()), vec![2]);
        assert_eq!(ids(&qs.filter_by(&[("age__lte", json!(31))]).unwrap()), vec![1, 2, 3]);
        assert_eq!(ids(&qs.filter_by(&[("age__gt", json!(31))]).unwrap()), vec![4]);
        assert_eq!(ids(&qs.filter_by(&[("age__gte", json!(31))]).unwrap()), vec![1, 3, 4]);
        assert_eq!(ids(&qs.filter_by(&[("age", json!(31.0))]).unwrap()), vec![1, 3]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let rows = people();
        let qs = QuerySet::new(&rows)
            .filter_by(&[("city", json!("Paris")), ("age__gt", json!(40))])
            .unwrap();
        assert_eq!(ids(&qs), vec![4]);
    }

    #[test]
    fn icontains_is_case_insensitive_and_false_on_non_text() {
        let rows = people();
        let qs = QuerySet::new(&rows);
        assert_eq!(ids(&qs.filter_by(&[("name__icontains", json!("AL"))]).unwrap()), vec![1, 4]);
        assert!(!qs.filter_by(&[("age__icontains", json!("3"))]).unwrap().exists());
    }

    #[test]
    fn in_lookup_tests_membership() {
        let rows = people();
        let qs = QuerySet::new(&rows)
            .filter_by(&[("city__in", json!(["Lyon", "Nice"]))])
            .unwrap();
        assert_eq!(ids(&qs), vec![2, 3]);
    }

    #[test]
    fn unsupported_lookup_fails() {
        let rows = people();
        let err = QuerySet::new(&rows)
            .filter_by(&[("age__between", json!(1))])
            .unwrap_err();
        assert_eq!(err, FrameworkError::UnsupportedLookup("between".into()));
    }

    #[test]
    fn order_by_is_stable_and_supports_descending() {
        let rows = people();
        let qs = QuerySet::new(&rows);
        assert_eq!(ids(&qs.order_by(&["-age"])), vec![4, 1, 3, 2]);
        assert_eq!(ids(&qs.order_by(&["age", "-name"])), vec![2, 3, 1, 4]);
        assert_eq!(ids(&qs.order_by(&["city"])), vec![2, 3, 1, 4]);
    }

    #[test]
    fn paginate_out_of_range_is_empty() {
        let rows = people();
        let qs = QuerySet::new(&rows);
        assert_eq!(ids(&qs.paginate(2, 3)), vec![4]);
        assert!(!qs.paginate(3, 3).exists());
        assert!(!qs.paginate(usize::MAX, usize::MAX).exists());
    }

    #[test]
    fn get_reports_missing_and_ambiguous() {
        let rows = people();
        let qs = QuerySet::new(&rows);
        let found = qs.get(&[Filter::parse("id", json!(2)).unwrap()]).unwrap();
        assert_eq!(found["name"], "bob");

        let missing = qs.get(&[Filter::parse("id", json!(99)).unwrap()]);
        assert!(matches!(missing, Err(FrameworkError::NotFound(_))));

        let ambiguous = qs.get(&[Filter::parse("city", json!("Paris")).unwrap()]);
        assert!(matches!(ambiguous, Err(FrameworkError::AmbiguousResult(_))));
    }

    #[test]
    fn exclude_and_projections() {
        let rows = people();
        let qs = QuerySet::new(&rows).exclude(&[Filter::parse("city", json!("Paris")).unwrap()]);
        assert_eq!(ids(&qs), vec![2, 3]);
        assert_eq!(qs.values_flat("name"), vec![json!("bob"), json!("Carol")]);
        assert_eq!(qs.values(&["id"])[0], json!({"id": 2}).as_object().unwrap().clone());
        assert_eq!(qs.first().unwrap()["id"], 2);
        assert_eq!(qs.last().unwrap()["id"], 3);
        assert_eq!(rows.len(), 4);
    }
}
