use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SYMBOLS: &[&str] = &["BTC", "ETH", "BNB", "SOL", "ADA", "XRP", "LTC", "DOGE", "DOT"];
pub const STATUSES: &[&str] = &["completed", "pending", "failed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoTransaction {
    pub id: u64,
    pub uuid: Uuid,
    /// Sending wallet address.
    pub sender: String,
    pub receiver: String,
    pub crypto_symbol: String,
    pub amount: f64,
    pub fee: f64,
    pub timestamp: NaiveDateTime,
    pub status: String,
}

impl Resource for CryptoTransaction {
    const KEY: StateKey = StateKey::new("crypto_transactions");
    const PREFIX: &'static str = "/crypto-transactions";
    const VERBOSE_NAME: &'static str = "crypto transaction";
    const VERBOSE_NAME_PLURAL: &'static str = "crypto transactions";
    const DESCRIPTION: &'static str = "Fake crypto transactions data";

    fn schema() -> Schema {
        Schema::new(
            "crypto transaction",
            &[
                FieldSpec::new("sender", FieldKind::Text),
                FieldSpec::new("receiver", FieldKind::Text),
                FieldSpec::new("crypto_symbol", FieldKind::Text),
                FieldSpec::new("amount", FieldKind::Float),
                FieldSpec::new("fee", FieldKind::Float),
                FieldSpec::new("timestamp", FieldKind::DateTime),
                FieldSpec::new("status", FieldKind::Text),
            ],
        )
        .with_rules(&[
            Rule::OneOf("crypto_symbol", SYMBOLS),
            Rule::OneOf("status", STATUSES),
            Rule::GreaterThan("amount", 0.0),
            Rule::GreaterThan("fee", 0.0),
        ])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| CryptoTransaction {
                id,
                uuid: Uuid::new_v4(),
                sender: fake::sha256_hex(&mut rng),
                receiver: fake::sha256_hex(&mut rng),
                crypto_symbol: fake::pick(&mut rng, SYMBOLS).to_string(),
                amount: fake::decimal(&mut rng, 0.001, 50.0, 8),
                fee: fake::decimal(&mut rng, 0.0001, 0.005, 6),
                timestamp: fake::datetime_within_past(&mut rng, 30),
                status: fake::pick(&mut rng, STATUSES).to_string(),
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
