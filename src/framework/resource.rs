//! # The Resource Contract
//!
//! Every resource served by the engine (users, products, orders, ...) implements
//! [`Resource`]. The trait is the only thing that varies between resources: it names
//! the resource, points at its slot in the store, describes its schema and knows how
//! to generate a fresh collection. Everything else (listing, filtering, identifier
//! resolution, create and update) is written once in
//! [`ResourceController`](crate::framework::ResourceController).
//!
//! Constants are associated `const`s so that route tables and log fields can be built
//! without an instance at hand.

use crate::framework::schema::Schema;
use crate::framework::store::StateKey;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use uuid::Uuid;

/// Trait that any record type must implement to be served by a
/// [`ResourceController`](crate::framework::ResourceController).
///
/// Implementations must keep `id()`/`uuid()` consistent with the `id`/`uuid` fields
/// of their serialized form.
pub trait Resource: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Slot holding this resource's collection. Distinct resources never share a key.
    const KEY: StateKey;

    /// Path prefix, e.g. `/users`.
    const PREFIX: &'static str;

    const VERBOSE_NAME: &'static str;
    const VERBOSE_NAME_PLURAL: &'static str;

    /// One-line description shown in the endpoint index.
    const DESCRIPTION: &'static str;

    fn schema() -> Schema;

    /// Produces a fresh collection of `length` records with ids `1..=length`.
    fn generate(length: usize, args: &GeneratorArgs) -> Vec<Self>;

    fn id(&self) -> u64;

    fn uuid(&self) -> Uuid;
}

/// Extra arguments handed to every generator call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorArgs {
    /// Makes generated field values reproducible. Uuids are always fresh.
    pub seed: Option<u64>,
}

impl GeneratorArgs {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Random source for one generation of the collection under `key`.
    ///
    /// With a seed, each key gets its own deterministic stream.
    pub fn rng(&self, key: StateKey) -> StdRng {
        match self.seed {
            Some(seed) => {
                let mixed = key
                    .as_str()
                    .bytes()
                    .fold(seed, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
                StdRng::seed_from_u64(mixed)
            }
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn seeded_rng_is_reproducible_per_key() {
        let args = GeneratorArgs::seeded(7);
        let users = StateKey::new("users");
        let todos = StateKey::new("todos");

        let a: [u64; 4] = args.rng(users).gen();
        let b: [u64; 4] = args.rng(users).gen();
        let c: [u64; 4] = args.rng(todos).gen();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
