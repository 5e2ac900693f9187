use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PRIORITIES: &[&str] = &["low", "medium", "high"];
pub const STATUSES: &[&str] = &["pending", "in progress", "completed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: String,
    pub status: String,
    pub assignee: String,
}

impl Resource for Todo {
    const KEY: StateKey = StateKey::new("todos");
    const PREFIX: &'static str = "/todos";
    const VERBOSE_NAME: &'static str = "todo";
    const VERBOSE_NAME_PLURAL: &'static str = "todos";
    const DESCRIPTION: &'static str = "Fake todos data";

    fn schema() -> Schema {
        Schema::new(
            "todo",
            &[
                FieldSpec::new("title", FieldKind::Text),
                FieldSpec::new("description", FieldKind::Text),
                FieldSpec::new("due_date", FieldKind::Date),
                FieldSpec::new("priority", FieldKind::Text),
                FieldSpec::new("status", FieldKind::Text),
                FieldSpec::new("assignee", FieldKind::Text),
            ],
        )
        .with_rules(&[
            Rule::OneOf("priority", PRIORITIES),
            Rule::OneOf("status", STATUSES),
        ])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| Todo {
                id,
                uuid: Uuid::new_v4(),
                title: fake::sentence(&mut rng, 6),
                description: fake::paragraph(&mut rng, 3),
                due_date: fake::date_within(&mut rng, 0, 30),
                priority: fake::pick(&mut rng, PRIORITIES).to_string(),
                status: fake::pick(&mut rng, STATUSES).to_string(),
                assignee: fake::full_name(&mut rng),
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
