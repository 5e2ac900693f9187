use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: u64,
    pub uuid: Uuid,
    pub sender: String,
    pub receiver: String,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub read: bool,
}

impl Resource for Chat {
    const KEY: StateKey = StateKey::new("chats");
    const PREFIX: &'static str = "/chats";
    const VERBOSE_NAME: &'static str = "chat";
    const VERBOSE_NAME_PLURAL: &'static str = "chats";
    const DESCRIPTION: &'static str = "Fake chats data";

    fn schema() -> Schema {
        Schema::new(
            "chat",
            &[
                FieldSpec::new("sender", FieldKind::Text),
                FieldSpec::new("receiver", FieldKind::Text),
                FieldSpec::new("message", FieldKind::Text),
                FieldSpec::new("timestamp", FieldKind::DateTime),
                FieldSpec::new("read", FieldKind::Boolean),
            ],
        )
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| Chat {
                id,
                uuid: Uuid::new_v4(),
                sender: fake::full_name(&mut rng),
                receiver: fake::full_name(&mut rng),
                message: fake::sentence(&mut rng, 10),
                timestamp: fake::datetime_within_past(&mut rng, 365),
                read: fake::boolean(&mut rng),
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
