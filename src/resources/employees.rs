use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEPARTMENTS: &[&str] = &[
    "HR",
    "Finance",
    "IT",
    "Sales",
    "Marketing",
    "Customer Service",
    "Legal",
    "Operations",
    "R&D",
    "Procurement",
    "Administration",
    "Logistics",
    "Quality Assurance",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub job_title: String,
    pub hire_date: NaiveDate,
    pub department: String,
    pub salary: f64,
}

impl Resource for Employee {
    const KEY: StateKey = StateKey::new("employees");
    const PREFIX: &'static str = "/employees";
    const VERBOSE_NAME: &'static str = "employee";
    const VERBOSE_NAME_PLURAL: &'static str = "employees";
    const DESCRIPTION: &'static str = "Fake employees data";

    fn schema() -> Schema {
        Schema::new(
            "employee",
            &[
                FieldSpec::new("first_name", FieldKind::Text),
                FieldSpec::new("last_name", FieldKind::Text),
                FieldSpec::new("email", FieldKind::Text),
                FieldSpec::new("phone_number", FieldKind::Text),
                FieldSpec::new("job_title", FieldKind::Text),
                FieldSpec::new("hire_date", FieldKind::Date),
                FieldSpec::new("department", FieldKind::Text),
                FieldSpec::new("salary", FieldKind::Float),
            ],
        )
        .with_rules(&[
            Rule::OneOf("department", DEPARTMENTS),
            Rule::Min("salary", 0.0),
        ])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| {
                let first_name = fake::first_name(&mut rng);
                let last_name = fake::last_name(&mut rng);
                Employee {
                    id,
                    uuid: Uuid::new_v4(),
                    email: fake::email(&mut rng, &first_name, &last_name),
                    phone_number: fake::phone_number(&mut rng),
                    job_title: fake::job(&mut rng),
                    hire_date: fake::date_within(&mut rng, -30 * 365, 0),
                    department: fake::pick(&mut rng, DEPARTMENTS).to_string(),
                    salary: f64::from(rng.gen_range(24_000u32..=200_000)),
                    first_name,
                    last_name,
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
