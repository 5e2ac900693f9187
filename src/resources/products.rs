use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Home",
    "Fashion",
    "Beauty",
    "Food",
    "Sports",
    "Toys",
    "Automotive",
    "Books",
    "Health",
    "Garden",
    "Office",
    "Jewelry",
    "Music",
    "Pets",
    "Tools",
    "Baby",
    "Outdoors",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub uuid: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub ean_13: String,
    pub stock: i64,
    pub vendor: String,
    pub picture: String,
    pub description: String,
    pub rating: f64,
    pub reviews_count: i64,
    pub created_at: NaiveDateTime,
}

impl Product {
    /// One random product with the given id.
    pub(crate) fn fake<R: Rng>(rng: &mut R, id: u64) -> Self {
        Product {
            id,
            uuid: Uuid::new_v4(),
            name: fake::catch_phrase(rng),
            category: fake::pick(rng, CATEGORIES).to_string(),
            price: fake::decimal(rng, 5.0, 999.0, 2),
            ean_13: fake::ean13(rng),
            stock: rng.gen_range(0..=500),
            vendor: fake::company(rng),
            picture: format!("https://source.unsplash.com/400x400/?product&sig={id}"),
            description: fake::sentence(rng, 10),
            rating: fake::decimal(rng, 1.0, 5.0, 1),
            reviews_count: rng.gen_range(0..=1000),
            created_at: fake::datetime_within_past(rng, 365),
        }
    }
}

impl Resource for Product {
    const KEY: StateKey = StateKey::new("products");
    const PREFIX: &'static str = "/products";
    const VERBOSE_NAME: &'static str = "product";
    const VERBOSE_NAME_PLURAL: &'static str = "products";
    const DESCRIPTION: &'static str = "Fake products data";

    fn schema() -> Schema {
        Schema::new(
            "product",
            &[
                FieldSpec::new("name", FieldKind::Text),
                FieldSpec::new("category", FieldKind::Text),
                FieldSpec::new("price", FieldKind::Float),
                FieldSpec::new("ean_13", FieldKind::Text),
                FieldSpec::new("stock", FieldKind::Integer),
                FieldSpec::new("vendor", FieldKind::Text),
                FieldSpec::new("picture", FieldKind::Text),
                FieldSpec::new("description", FieldKind::Text),
                FieldSpec::new("rating", FieldKind::Float),
                FieldSpec::new("reviews_count", FieldKind::Integer),
                FieldSpec::new("created_at", FieldKind::DateTime),
            ],
        )
        .with_rules(&[
            Rule::OneOf("category", CATEGORIES),
            Rule::Min("price", 0.0),
            Rule::Min("stock", 0.0),
            Rule::Min("rating", 1.0),
            Rule::Max("rating", 5.0),
            Rule::Min("reviews_count", 0.0),
        ])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| Product::fake(&mut rng, id))
            .collect()
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn uuid(&self) -> Uuid {
        self.uuid
    }
}
