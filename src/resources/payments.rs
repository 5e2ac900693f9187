use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const METHODS: &[&str] = &[
    "Cash",
    "Credit Card",
    "Debit Card",
    "Bank Transfer",
    "PayPal",
    "Cryptocurrency",
    "Mobile Payment",
];
pub const STATUSES: &[&str] = &["Pending", "Completed", "Failed", "Refunded"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub uuid: Uuid,
    pub hash: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: String,
    pub method: String,
}

impl Resource for Payment {
    const KEY: StateKey = StateKey::new("payments");
    const PREFIX: &'static str = "/payments";
    const VERBOSE_NAME: &'static str = "payment";
    const VERBOSE_NAME_PLURAL: &'static str = "payments";
    const DESCRIPTION: &'static str = "Fake payments data";

    fn schema() -> Schema {
        Schema::new(
            "payment",
            &[
                FieldSpec::new("hash", FieldKind::Text),
                FieldSpec::new("amount", FieldKind::Float),
                FieldSpec::new("date", FieldKind::Date),
                FieldSpec::new("status", FieldKind::Text),
                FieldSpec::new("method", FieldKind::Text),
            ],
        )
        .with_rules(&[
            Rule::Min("amount", 0.0),
            Rule::OneOf("status", STATUSES),
            Rule::OneOf("method", METHODS),
        ])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| Payment {
                id,
                uuid: Uuid::new_v4(),
                hash: fake::sha256_hex(&mut rng),
                amount: fake::decimal(&mut rng, 1.0, 9_999.99, 2),
                date: fake::date_within(&mut rng, -10 * 365, 0),
                status: fake::pick(&mut rng, STATUSES).to_string(),
                method: fake::pick(&mut rng, METHODS).to_string(),
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
