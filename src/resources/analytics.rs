use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `(metric_name, unit, category, value range)`
const METRICS: &[(&str, &str, &str, (f64, f64))] = &[
    ("visits", "users", "Traffic", (100.0, 5_000.0)),
    ("sales", "$", "Finance", (1_000.0, 50_000.0)),
    ("signups", "users", "Conversion", (100.0, 5_000.0)),
    ("bounce_rate", "%", "Traffic", (10.0, 90.0)),
    ("revenue", "$", "Finance", (1_000.0, 50_000.0)),
    ("conversion_rate", "%", "Conversion", (10.0, 90.0)),
];

pub const METRIC_NAMES: &[&str] = &[
    "visits",
    "sales",
    "signups",
    "bounce_rate",
    "revenue",
    "conversion_rate",
];
pub const UNITS: &[&str] = &["users", "$", "%"];
pub const CATEGORIES: &[&str] = &["Traffic", "Finance", "Conversion"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytic {
    pub id: u64,
    pub uuid: Uuid,
    pub metric_name: String,
    pub value: f64,
    /// Percent change from `previous_value`.
    pub trend: f64,
    pub category: String,
    pub unit: String,
    pub previous_value: f64,
    pub timestamp: NaiveDateTime,
}

impl Resource for Analytic {
    const KEY: StateKey = StateKey::new("analytics");
    const PREFIX: &'static str = "/analytics";
    const VERBOSE_NAME: &'static str = "analytic";
    const VERBOSE_NAME_PLURAL: &'static str = "analytics";
    const DESCRIPTION: &'static str = "Fake analytics data";

    fn schema() -> Schema {
        Schema::new(
            "analytic",
            &[
                FieldSpec::new("metric_name", FieldKind::Text),
                FieldSpec::new("value", FieldKind::Float),
                FieldSpec::new("trend", FieldKind::Float),
                FieldSpec::new("category", FieldKind::Text),
                FieldSpec::new("unit", FieldKind::Text),
                FieldSpec::new("previous_value", FieldKind::Float),
                FieldSpec::new("timestamp", FieldKind::DateTime),
            ],
        )
        .with_rules(&[
            Rule::OneOf("metric_name", METRIC_NAMES),
            Rule::OneOf("unit", UNITS),
            Rule::OneOf("category", CATEGORIES),
        ])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| {
                let (name, unit, category, (min, max)) = METRICS[rng.gen_range(0..METRICS.len())];
                let value = fake::decimal(&mut rng, min, max, 2);
                let ratio: f64 = rng.gen_range(-0.2..=0.2);
                let previous_value = fake::round2(value * (1.0 - ratio));
                let trend = fake::round2((value - previous_value) / previous_value * 100.0);
                Analytic {
                    id,
                    uuid: Uuid::new_v4(),
                    metric_name: name.to_string(),
                    value,
                    trend,
                    category: category.to_string(),
                    unit: unit.to_string(),
                    previous_value,
                    timestamp: fake::datetime_within_past(&mut rng, 30),
                }
            })
            .collect()
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }
}
