use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const LEVELS: &[&str] = &["info", "success", "warning", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub uuid: Uuid,
    pub title: String,
    pub message: String,
    pub level: String,
    pub timestamp: NaiveDateTime,
    pub is_read: bool,
}

impl Resource for Notification {
    const KEY: StateKey = StateKey::new("notifications");
    const PREFIX: &'static str = "/notifications";
    const VERBOSE_NAME: &'static str = "notification";
    const VERBOSE_NAME_PLURAL: &'static str = "notifications";
    const DESCRIPTION: &'static str = "Fake notifications data";

    fn schema() -> Schema {
        Schema::new(
            "notification",
            &[
                FieldSpec::new("title", FieldKind::Text),
                FieldSpec::new("message", FieldKind::Text),
                FieldSpec::new("level", FieldKind::Text),
                FieldSpec::new("timestamp", FieldKind::DateTime),
                FieldSpec::new("is_read", FieldKind::Boolean),
            ],
        )
        .with_rules(&[Rule::OneOf("level", LEVELS)])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| Notification {
                id,
                uuid: Uuid::new_v4(),
                title: fake::sentence(&mut rng, 5),
                message: fake::text(&mut rng, 200),
                level: fake::pick(&mut rng, LEVELS).to_string(),
                timestamp: fake::datetime_within_past(&mut rng, 10 * 365),
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
