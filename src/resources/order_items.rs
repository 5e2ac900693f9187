use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use crate::resources::products::Product;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One order line: a product and the quantity bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u64,
    pub uuid: Uuid,
    pub quantity: i64,
    pub total: f64,
    pub product: Product,
}

impl OrderItem {
    /// A line for `product` with a random quantity and the matching total.
    pub(crate) fn fake<R: Rng>(rng: &mut R, id: u64, product: Product) -> Self {
        let quantity = rng.gen_range(1..=5);
        OrderItem {
            id,
            uuid: Uuid::new_v4(),
            quantity,
            total: fake::round2(product.price * quantity as f64),
            product,
        }
    }
}

impl Resource for OrderItem {
    const KEY: StateKey = StateKey::new("order-items");
    const PREFIX: &'static str = "/order-items";
    const VERBOSE_NAME: &'static str = "order item";
    const VERBOSE_NAME_PLURAL: &'static str = "order items";
    const DESCRIPTION: &'static str = "Fake order items data";

    fn schema() -> Schema {
        Schema::new(
            "order item",
            &[
                FieldSpec::new("quantity", FieldKind::Integer),
                FieldSpec::new("total", FieldKind::Float),
                FieldSpec::new("product", FieldKind::Object),
            ],
        )
        .with_rules(&[Rule::GreaterThan("quantity", 0.0), Rule::Min("total", 0.0)])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| {
                let product = Product::fake(&mut rng, id);
                OrderItem::fake(&mut rng, id, product)
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
