use crate::framework::{FieldKind, FieldSpec, GeneratorArgs, Resource, Rule, Schema, StateKey};
use crate::resources::fake;
use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `(name, symbol)` of every listed coin.
pub const COINS: &[(&str, &str)] = &[
    ("Bitcoin", "BTC"),
    ("Ethereum", "ETH"),
    ("Binance Coin", "BNB"),
    ("Solana", "SOL"),
    ("Cardano", "ADA"),
    ("Ripple", "XRP"),
    ("Dogecoin", "DOGE"),
    ("Polkadot", "DOT"),
    ("Litecoin", "LTC"),
    ("Chainlink", "LINK"),
];

pub const SYMBOLS: &[&str] = &[
    "BTC", "ETH", "BNB", "SOL", "ADA", "XRP", "DOGE", "DOT", "LTC", "LINK",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crypto {
    pub id: u64,
    pub uuid: Uuid,
    pub name: String,
    pub symbol: String,
    pub price_usd: f64,
    pub market_cap_usd: f64,
    pub volume_24h_usd: f64,
    pub change_24h: f64,
    pub last_updated: NaiveDateTime,
}

impl Resource for Crypto {
    const KEY: StateKey = StateKey::new("cryptos");
    const PREFIX: &'static str = "/cryptos";
    const VERBOSE_NAME: &'static str = "crypto";
    const VERBOSE_NAME_PLURAL: &'static str = "cryptos";
    const DESCRIPTION: &'static str = "Fake cryptos data";

    fn schema() -> Schema {
        Schema::new(
            "crypto",
            &[
                FieldSpec::new("name", FieldKind::Text),
                FieldSpec::new("symbol", FieldKind::Text),
                FieldSpec::new("price_usd", FieldKind::Float),
                FieldSpec::new("market_cap_usd", FieldKind::Float),
                FieldSpec::new("volume_24h_usd", FieldKind::Float),
                FieldSpec::new("change_24h", FieldKind::Float),
                FieldSpec::new("last_updated", FieldKind::DateTime),
            ],
        )
        .with_rules(&[
            Rule::OneOf("symbol", SYMBOLS),
            Rule::Min("price_usd", 0.0),
            Rule::Min("market_cap_usd", 0.0),
            Rule::Min("volume_24h_usd", 0.0),
        ])
    }

    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self> {
        let mut rng = args.rng(Self::KEY);
        (1..=length as u64)
            .map(|id| {
                let (name, symbol) = COINS[rng.gen_range(0..COINS.len())];
                let price_usd = fake::decimal(&mut rng, 0.05, 70_000.0, 2);
                let market_cap_usd =
                    fake::round2(price_usd * rng.gen_range(10_000_000.0f64..=500_000_000.0));
                let volume_24h_usd = fake::round2(market_cap_usd * rng.gen_range(0.01f64..=0.25));
                Crypto {
                    id,
                    uuid: Uuid::new_v4(),
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    price_usd,
                    market_cap_usd,
                    volume_24h_usd,
                    change_24h: fake::decimal(&mut rng, -15.0, 15.0, 2),
                    last_updated: fake::datetime_within_past(&mut rng, 1),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_symbols_stay_paired() {
        assert_eq!(
            COINS.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
            SYMBOLS.to_vec()
        );
        for coin in Crypto::generate(20, &GeneratorArgs::seeded(5)) {
            assert!(COINS
                .iter()
                .any(|(name, symbol)| *name == coin.name && *symbol == coin.symbol));
            assert!(coin.volume_24h_usd <= coin.market_cap_usd);
        }
    }
}
