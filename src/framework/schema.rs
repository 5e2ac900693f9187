//! # Resource Schema
//!
//! A [`Schema`] describes one resource type: its ordered, typed fields, the fields
//! hidden from search, and the validation rules a record must satisfy.
//!
//! Validation runs in two steps. The candidate JSON record is first deserialized into
//! the resource's Rust type, which checks structure and types (and coerces, e.g. an
//! integer into a float). The coerced record is then checked against the schema's
//! [`Rule`]s.

use crate::framework::error::FrameworkError;
use crate::framework::query::to_row;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// The declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    Boolean,
    Date,
    DateTime,
    Uuid,
    Object,
    List,
}

impl FieldKind {
    /// Kinds that serialize to JSON strings.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Date | FieldKind::DateTime | FieldKind::Uuid
        )
    }

    /// Coerces a raw query-string value into a JSON value of this kind.
    pub fn coerce(&self, raw: &str) -> Result<Value, String> {
        let trimmed = raw.trim();
        match self {
            FieldKind::Integer => trimmed
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("'{raw}' is not a valid integer")),
            FieldKind::Float => trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| format!("'{raw}' is not a valid number")),
            FieldKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
                "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
                _ => Err(format!("'{raw}' is not a valid boolean")),
            },
            _ => Ok(Value::String(raw.to_string())),
        }
    }
}

/// One named, typed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A validation rule evaluated on the coerced record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// `field >= bound`
    Min(&'static str, f64),
    /// `field <= bound`
    Max(&'static str, f64),
    /// `field > bound`
    GreaterThan(&'static str, f64),
    /// `field` is one of the listed strings.
    OneOf(&'static str, &'static [&'static str]),
}

impl Rule {
    pub fn field(&self) -> &'static str {
        match self {
            Rule::Min(f, _) | Rule::Max(f, _) | Rule::GreaterThan(f, _) | Rule::OneOf(f, _) => f,
        }
    }

    pub fn check(&self, row: &Map<String, Value>) -> Result<(), String> {
        let field = self.field();
        let value = row.get(field).unwrap_or(&Value::Null);
        match self {
            Rule::Min(_, bound) => number(field, value).and_then(|n| {
                (n >= *bound)
                    .then_some(())
                    .ok_or_else(|| format!("{field} must be greater than or equal to {bound}"))
            }),
            Rule::Max(_, bound) => number(field, value).and_then(|n| {
                (n <= *bound)
                    .then_some(())
                    .ok_or_else(|| format!("{field} must be less than or equal to {bound}"))
            }),
            Rule::GreaterThan(_, bound) => number(field, value).and_then(|n| {
                (n > *bound)
                    .then_some(())
                    .ok_or_else(|| format!("{field} must be greater than {bound}"))
            }),
            Rule::OneOf(_, choices) => match value.as_str() {
                Some(s) if choices.contains(&s) => Ok(()),
                _ => Err(format!("{field} must be one of: {}", choices.join(", "))),
            },
        }
    }
}

fn number(field: &str, value: &Value) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("{field} must be a number"))
}

/// Field list, search exclusions and validation rules for one resource type.
///
/// Every schema starts with the identity fields `id` and `uuid`.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldSpec>,
    excluded: Vec<&'static str>,
    rules: Vec<Rule>,
}

impl Schema {
    pub fn new(name: &'static str, fields: &[FieldSpec]) -> Self {
        let mut all = vec![
            FieldSpec::new("id", FieldKind::Integer),
            FieldSpec::new("uuid", FieldKind::Uuid),
        ];
        all.extend(fields.iter().copied());
        Self {
            name,
            fields: all,
            excluded: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Hides fields (e.g. credentials) from the derived filter surface.
    pub fn exclude_from_search(mut self, fields: &[&'static str]) -> Self {
        self.excluded.extend_from_slice(fields);
        self
    }

    pub fn with_rules(mut self, rules: &[Rule]) -> Self {
        self.rules.extend_from_slice(rules);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn excluded(&self) -> &[&'static str] {
        &self.excluded
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(&name)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Type-checks `candidate` as a `T`, then applies the schema's rules.
    ///
    /// Returns the coerced record.
    pub fn validate<T>(&self, candidate: Map<String, Value>) -> Result<T, FrameworkError>
    where
        T: Serialize + DeserializeOwned,
    {
        let record: T = serde_json::from_value(Value::Object(candidate)).map_err(|e| {
            FrameworkError::ValidationError(format!("Invalid {}: {e}", self.name))
        })?;

        let row = to_row(&record);
        let violations: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(&row).err())
            .collect();
        if !violations.is_empty() {
            return Err(FrameworkError::ValidationError(format!(
                "Invalid {}: {}",
                self.name,
                violations.join("; ")
            )));
        }
        Ok(record)
    }
}
