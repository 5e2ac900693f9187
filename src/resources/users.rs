//! User accounts. The `password` field is never filterable.

use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SEX_CHOICES: &[&str] = &["male", "female"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub phone_number: String,
    pub birth_date: NaiveDate,
    pub sex: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    pub date_joined: NaiveDateTime,
    pub last_login: NaiveDateTime,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Resource for User {
    const KEY: StateKey = StateKey::new("users");
    const PREFIX: &'static str = "/users";
    const VERBOSE_NAME: &'static str = "user";
    const VERBOSE_NAME_PLURAL: &'static str = "users";
    const DESCRIPTION: &'static str = "Fake users data";

    fn schema() -> Schema {
        Schema::new(
            "user",
            &[
                FieldSpec::new("first_name", FieldKind::Text),
                FieldSpec::new("last_name", FieldKind::Text),
                FieldSpec::new("email", FieldKind::Text),
                FieldSpec::new("username", FieldKind::Text),
                FieldSpec::new("password", FieldKind::Text),
                FieldSpec::new("phone_number", FieldKind::Text),
                FieldSpec::new("birth_date", FieldKind::Date),
                FieldSpec::new("sex", FieldKind::Text),
                FieldSpec::new("address", FieldKind::Text),
                FieldSpec::new("postal_code", FieldKind::Text),
                FieldSpec::new("city", FieldKind::Text),
                FieldSpec::new("country", FieldKind::Text),
                FieldSpec::new("date_joined", FieldKind::DateTime),
                FieldSpec::new("last_login", FieldKind::DateTime),
                FieldSpec::new("is_active", FieldKind::Boolean),
                FieldSpec::new("is_staff", FieldKind::Boolean),
                FieldSpec::new("is_superuser", FieldKind::Boolean),
            ],
        )
        .exclude_from_search(&["password"])
        .with_rules(&[Rule::OneOf("sex", SEX_CHOICES)])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| {
                let first_name = fake::first_name(&mut rng);
                let last_name = fake::last_name(&mut rng);
                let date_joined = fake::datetime_within_past(&mut rng, 5 * 365);
                User {
                    id,
                    uuid: Uuid::new_v4(),
                    email: fake::email(&mut rng, &first_name, &last_name),
                    username: fake::username(&mut rng, &first_name, &last_name),
                    password: fake::password(&mut rng, 16),
                    phone_number: fake::phone_number(&mut rng),
                    birth_date: fake::date_of_birth(&mut rng, 0, 90),
                    sex: fake::pick(&mut rng, SEX_CHOICES).to_string(),
                    address: fake::street_address(&mut rng),
                    postal_code: fake::postal_code(&mut rng),
                    city: fake::city(&mut rng),
                    country: fake::country(&mut rng),
                    date_joined,
                    last_login: fake::datetime_within_past(&mut rng, 30).max(date_joined),
                    is_active: fake::boolean(&mut rng),
                    is_staff: fake::boolean(&mut rng),
                    is_superuser: fake::boolean(&mut rng),
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
