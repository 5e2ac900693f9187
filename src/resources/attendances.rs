use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: u64,
    pub uuid: Uuid,
    pub employee_id: Uuid,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub worked_hours: f64,
}

impl Resource for Attendance {
    const KEY: StateKey = StateKey::new("attendances");
    const PREFIX: &'static str = "/attendances";
    const VERBOSE_NAME: &'static str = "attendance";
    const VERBOSE_NAME_PLURAL: &'static str = "attendances";
    const DESCRIPTION: &'static str = "Fake attendances data";

    fn schema() -> Schema {
        Schema::new(
            "attendance",
            &[
                FieldSpec::new("employee_id", FieldKind::Uuid),
                FieldSpec::new("check_in", FieldKind::DateTime),
                FieldSpec::new("check_out", FieldKind::DateTime),
                FieldSpec::new("worked_hours", FieldKind::Float),
            ],
        )
        .with_rules(&[Rule::Min("worked_hours", 0.0), Rule::Max("worked_hours", 24.0)])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| {
                let check_in = fake::datetime_within_past(&mut rng, 30);
                let worked_hours = fake::decimal(&mut rng, 0.0, 24.0, 2);
                let check_out = check_in + Duration::seconds((worked_hours * 3600.0) as i64);
                Attendance {
                    id,
                    uuid: Uuid::new_v4(),
                    employee_id: Uuid::new_v4(),
                    check_in,
                    check_out,
                    worked_hours,
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
