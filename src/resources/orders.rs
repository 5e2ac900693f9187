use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use crate::resources::order_items::OrderItem;
use crate::resources::products::Product;
use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub uuid: Uuid,
    pub customer: String,
    pub total: f64,
    pub date: NaiveDateTime,
    pub order_items: Vec<OrderItem>,
}

impl Resource for Order {
    const KEY: StateKey = StateKey::new("orders");
    const PREFIX: &'static str = "/orders";
    const VERBOSE_NAME: &'static str = "order";
    const VERBOSE_NAME_PLURAL: &'static str = "orders";
    const DESCRIPTION: &'static str = "Fake orders data";

    fn schema() -> Schema {
        Schema::new(
            "order",
            &[
                FieldSpec::new("customer", FieldKind::Text),
                FieldSpec::new("total", FieldKind::Float),
                FieldSpec::new("date", FieldKind::DateTime),
                FieldSpec::new("order_items", FieldKind::List),
            ],
        )
        .with_rules(&[Rule::Min("total", 0.0)])
    }

    /// Orders draw their lines from a catalogue of `length` products.
    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        let catalogue: Vec<Product> = (1..=length as u64)
            .map(|id| Product::fake(&mut rng, id))
            .collect();
        if catalogue.is_empty() {
            return Vec::new();
        }

        (1..=length as u64)
            .map(|id| {
                let lines = rng.gen_range(1..=5u64);
                let order_items: Vec<OrderItem> = (1..=lines)
                    .map(|line| {
                        let product = catalogue[rng.gen_range(0..catalogue.len())].clone();
                        OrderItem::fake(&mut rng, line, product)
                    })
                    .collect();
                let total = fake::round2(order_items.iter().map(|item| item.total).sum());
                Order {
                    id,
                    uuid: Uuid::new_v4(),
                    customer: fake::full_name(&mut rng),
                    total,
                    date: fake::datetime_within_past(&mut rng, 365),
                    order_items,
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
