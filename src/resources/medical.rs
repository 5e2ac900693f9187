use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SEXES: &[&str] = &["male", "female"];
pub const BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
pub const ALLERGIES: &[&str] = &["Peanuts", "Dust", "Latex", "None", "Shellfish"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medical {
    pub id: u64,
    pub uuid: Uuid,
    pub sex: String,
    pub first_name: String,
    pub last_name: String,
    pub blood_type: String,
    pub birth_date: NaiveDate,
    pub ssn: String,
    pub allergies: String,
}

impl Resource for Medical {
    const KEY: StateKey = StateKey::new("medical");
    const PREFIX: &'static str = "/medical";
    const VERBOSE_NAME: &'static str = "medical";
    const VERBOSE_NAME_PLURAL: &'static str = "medicals";
    const DESCRIPTION: &'static str = "Fake medical data";

    fn schema() -> Schema {
        Schema::new(
            "medical",
            &[
                FieldSpec::new("sex", FieldKind::Text),
                FieldSpec::new("first_name", FieldKind::Text),
                FieldSpec::new("last_name", FieldKind::Text),
                FieldSpec::new("blood_type", FieldKind::Text),
                FieldSpec::new("birth_date", FieldKind::Date),
                FieldSpec::new("ssn", FieldKind::Text),
                FieldSpec::new("allergies", FieldKind::Text),
            ],
        )
        .with_rules(&[
            Rule::OneOf("sex", SEXES),
            Rule::OneOf("blood_type", BLOOD_TYPES),
            Rule::OneOf("allergies", ALLERGIES),
        ])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| Medical {
                id,
                uuid: Uuid::new_v4(),
                sex: fake::pick(&mut rng, SEXES).to_string(),
                first_name: fake::first_name(&mut rng),
                last_name: fake::last_name(&mut rng),
                blood_type: fake::pick(&mut rng, BLOOD_TYPES).to_string(),
                birth_date: fake::date_of_birth(&mut rng, 0, 90),
                ssn: fake::ssn(&mut rng),
                allergies: fake::pick(&mut rng, ALLERGIES).to_string(),
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
