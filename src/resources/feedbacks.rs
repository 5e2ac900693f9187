use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: u64,
    pub uuid: Uuid,
    pub sender: String,
    pub content: String,
    pub timestamp: NaiveDateTime,
    pub is_read: bool,
}

impl Resource for Feedback {
    const KEY: StateKey = StateKey::new("feedbacks");
    const PREFIX: &'static str = "/feedbacks";
    const VERBOSE_NAME: &'static str = "feedback";
    const VERBOSE_NAME_PLURAL: &'static str = "feedbacks";
    const DESCRIPTION: &'static str = "Fake feedbacks data";

    fn schema() -> Schema {
        Schema::new(
            "feedback",
            &[
                FieldSpec::new("sender", FieldKind::Text),
                FieldSpec::new("content", FieldKind::Text),
                FieldSpec::new("timestamp", FieldKind::DateTime),
                FieldSpec::new("is_read", FieldKind::Boolean),
            ],
        )
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| Feedback {
                id,
                uuid: Uuid::new_v4(),
                sender: fake::full_name(&mut rng),
                content: fake::text(&mut rng, 200),
                timestamp: fake::datetime_within_past(&mut rng, 365),
                is_read: fake::boolean(&mut rng),
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
