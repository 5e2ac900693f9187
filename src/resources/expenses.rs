use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const LABELS: &[&str] = &[
    "Grocery",
    "Taxi",
    "Internet",
    "Movie",
    "Electricity",
    "Water Bill",
    "Subscription",
];
pub const CATEGORIES: &[&str] = &["Food", "Transport", "Rent", "Utilities", "Entertainment"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub uuid: Uuid,
    pub label: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Resource for Expense {
    const KEY: StateKey = StateKey::new("expenses");
    const PREFIX: &'static str = "/expenses";
    const VERBOSE_NAME: &'static str = "expense";
    const VERBOSE_NAME_PLURAL: &'static str = "expenses";
    const DESCRIPTION: &'static str = "Fake expenses data";

    fn schema() -> Schema {
        Schema::new(
            "expense",
            &[
                FieldSpec::new("label", FieldKind::Text),
                FieldSpec::new("category", FieldKind::Text),
                FieldSpec::new("amount", FieldKind::Float),
                FieldSpec::new("date", FieldKind::Date),
            ],
        )
        .with_rules(&[
            Rule::OneOf("label", LABELS),
            Rule::OneOf("category", CATEGORIES),
            Rule::Min("amount", 0.0),
        ])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| Expense {
                id,
                uuid: Uuid::new_v4(),
                label: fake::pick(&mut rng, LABELS).to_string(),
                category: fake::pick(&mut rng, CATEGORIES).to_string(),
                amount: fake::decimal(&mut rng, 1.0, 9_999.99, 2),
                date: fake::date_within(&mut rng, -365, 0),
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
