use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: u64,
    pub uuid: Uuid,
    pub full_name: String,
    pub company: String,
    pub occupation: String,
    pub country: String,
    pub annual_income: f64,
    pub currency: String,
}

impl Resource for Income {
    const KEY: StateKey = StateKey::new("incomes");
    const PREFIX: &'static str = "/incomes";
    const VERBOSE_NAME: &'static str = "income";
    const VERBOSE_NAME_PLURAL: &'static str = "incomes";
    const DESCRIPTION: &'static str = "Fake incomes data";

    fn schema() -> Schema {
        Schema::new(
            "income",
            &[
                FieldSpec::new("full_name", FieldKind::Text),
                FieldSpec::new("company", FieldKind::Text),
                FieldSpec::new("occupation", FieldKind::Text),
                FieldSpec::new("country", FieldKind::Text),
                FieldSpec::new("annual_income", FieldKind::Float),
                FieldSpec::new("currency", FieldKind::Text),
            ],
        )
        .with_rules(&[Rule::Min("annual_income", 0.0)])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| Income {
                id,
                uuid: Uuid::new_v4(),
                full_name: fake::full_name(&mut rng),
                company: fake::company(&mut rng),
                occupation: fake::job(&mut rng),
                country: fake::country(&mut rng),
                annual_income: fake::decimal(&mut rng, 50_000.0, 9_999_999.0, 2),
                currency: fake::currency(&mut rng),
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
