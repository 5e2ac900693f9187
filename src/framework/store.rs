//! # Keyed State Store
//!
//! This module defines the process-wide cache that owns every materialized
//! collection. It follows the same split as the rest of the framework:
//!
//! - [`StoreActor`] is the "Server" half. It owns the slots and processes
//!   [`StoreRequest`]s one at a time in its own Tokio task.
//! - [`StateStore`] is the "Client" half. It is cheap to clone and is injected into
//!   every [`ResourceController`](crate::framework::ResourceController).
//!
//! Because the actor handles one message at a time, the read-modify-write sequences
//! that the controllers need (read max id → append → set) run without interleaving
//! and ids assigned by concurrent creates never collide.
//!
//! First-access generation is the exception: the generator runs on the blocking
//! pool so a large collection never stalls traffic for other keys. The actor keeps
//! a list of waiters per key while a generation is in flight, so generation still
//! happens at most once per key. A `Set` that lands while a generation is in flight
//! wins, and the waiters receive the stored collection.
//!
//! Slots are type-erased so a single store can hold collections of every resource
//! type. A slot whose concrete type does not match the requested record type is
//! reported as [`StoreError::Malformed`].

use crate::framework::error::StoreError;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task;
use tracing::{debug, error, info};

/// Opaque handle identifying one collection's slot in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(&'static str);

impl StateKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A stored collection. Always holds a `Vec<T>` for some record type `T`.
pub type Slot = Arc<dyn Any + Send + Sync>;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<T>;

/// Produces a slot and the number of records in it.
type Generate = Box<dyn FnOnce() -> (Slot, usize) + Send>;
type Apply = Box<dyn FnOnce(Option<Slot>) -> Option<Slot> + Send>;

/// Internal message type sent to the store actor.
pub enum StoreRequest {
    Get {
        key: StateKey,
        respond_to: Response<Option<Slot>>,
    },
    Set {
        key: StateKey,
        value: Slot,
        respond_to: Response<()>,
    },
    Exists {
        key: StateKey,
        respond_to: Response<bool>,
    },
    /// Replies `None` when the generator panicked and nothing was stored meanwhile.
    GetOrGenerate {
        key: StateKey,
        generate: Generate,
        respond_to: Response<Option<Slot>>,
    },
    /// Replies `false` when the modification panicked.
    Modify {
        key: StateKey,
        apply: Apply,
        respond_to: Response<bool>,
    },
}

impl fmt::Debug for StoreRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (op, key) = match self {
            StoreRequest::Get { key, .. } => ("Get", key),
            StoreRequest::Set { key, .. } => ("Set", key),
            StoreRequest::Exists { key, .. } => ("Exists", key),
            StoreRequest::GetOrGenerate { key, .. } => ("GetOrGenerate", key),
            StoreRequest::Modify { key, .. } => ("Modify", key),
        };
        f.debug_struct(op).field("key", key).finish()
    }
}

// =============================================================================
// THE STORE ACTOR
// =============================================================================

/// Outcome of a generation that ran on the blocking pool.
struct Generated {
    key: StateKey,
    outcome: Option<(Slot, usize)>,
}

/// The actor that owns every collection.
///
/// Create it with [`StoreActor::new`], spawn [`StoreActor::run`] on the runtime and hand
/// the returned [`StateStore`] to whoever needs access. The actor stops once every
/// client has been dropped.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    slots: HashMap<StateKey, Slot>,
    pending: HashMap<StateKey, Vec<Response<Option<Slot>>>>,
    generated_tx: mpsc::UnboundedSender<Generated>,
    generated_rx: mpsc::UnboundedReceiver<Generated>,
}

impl StoreActor {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client
    /// calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StateStore) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (generated_tx, generated_rx) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            slots: HashMap::new(),
            pending: HashMap::new(),
            generated_tx,
            generated_rx,
        };
        (actor, StateStore::new(sender))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    pub async fn run(mut self) {
        info!("Store started");

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => break,
                },
                Some(generated) = self.generated_rx.recv() => self.finish(generated),
            }
        }

        info!(size = self.slots.len(), "Shutdown");
    }

    fn handle(&mut self, msg: StoreRequest) {
        match msg {
            StoreRequest::Get { key, respond_to } => {
                let slot = self.slots.get(&key).cloned();
                debug!(%key, found = slot.is_some(), "Get");
                let _ = respond_to.send(slot);
            }
            StoreRequest::Set {
                key,
                value,
                respond_to,
            } => {
                let replaced = self.slots.insert(key, value).is_some();
                info!(%key, replaced, "Set");
                let _ = respond_to.send(());
            }
            StoreRequest::Exists { key, respond_to } => {
                let _ = respond_to.send(self.slots.contains_key(&key));
            }
            StoreRequest::GetOrGenerate {
                key,
                generate,
                respond_to,
            } => {
                if let Some(slot) = self.slots.get(&key) {
                    debug!(%key, "Cache hit, generation skipped");
                    let _ = respond_to.send(Some(slot.clone()));
                    return;
                }
                if let Some(waiters) = self.pending.get_mut(&key) {
                    debug!(%key, "Generation in flight, waiting");
                    waiters.push(respond_to);
                    return;
                }
                self.pending.insert(key, vec![respond_to]);
                let generated = self.generated_tx.clone();
                task::spawn_blocking(move || {
                    let outcome = catch_unwind(AssertUnwindSafe(generate)).ok();
                    let _ = generated.send(Generated { key, outcome });
                });
            }
            StoreRequest::Modify {
                key,
                apply,
                respond_to,
            } => {
                let current = self.slots.get(&key).cloned();
                match catch_unwind(AssertUnwindSafe(move || apply(current))) {
                    Ok(Some(next)) => {
                        self.slots.insert(key, next);
                        debug!(%key, "Modified");
                        let _ = respond_to.send(true);
                    }
                    Ok(None) => {
                        debug!(%key, "Modification rejected");
                        let _ = respond_to.send(true);
                    }
                    Err(_) => {
                        error!(%key, "Modification panicked");
                        let _ = respond_to.send(false);
                    }
                }
            }
        }
    }

    fn finish(&mut self, Generated { key, outcome }: Generated) {
        let waiters = self.pending.remove(&key).unwrap_or_default();
        let slot = match (outcome, self.slots.get(&key)) {
            (_, Some(current)) => {
                debug!(%key, "Collection set during generation, generated one dropped");
                Some(current.clone())
            }
            (Some((slot, len)), None) => {
                self.slots.insert(key, slot.clone());
                info!(%key, len, "Generated");
                Some(slot)
            }
            (None, None) => {
                error!(%key, "Generator panicked");
                None
            }
        };
        for waiter in waiters {
            let _ = waiter.send(slot.clone());
        }
    }
}

// =============================================================================
// THE STORE CLIENT
// =============================================================================

/// A cloneable client for the [`StoreActor`].
///
/// All methods are typed over the record type `T`; the collection for a key is a
/// `Vec<T>` and reads hand out an `Arc` snapshot of it.
#[derive(Clone)]
pub struct StateStore {
    sender: mpsc::Sender<StoreRequest>,
}

impl StateStore {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)
    }

    /// Returns the collection stored under `key`.
    ///
    /// Fails with [`StoreError::NotFound`] when nothing is stored there yet.
    pub async fn get<T: Send + Sync + 'static>(
        &self,
        key: StateKey,
    ) -> Result<Arc<Vec<T>>, StoreError> {
        let slot = self
            .request(|respond_to| StoreRequest::Get { key, respond_to })
            .await?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        downcast(key, slot)
    }

    /// Replaces the collection stored under `key`.
    pub async fn set<T: Send + Sync + 'static>(
        &self,
        key: StateKey,
        items: Vec<T>,
    ) -> Result<(), StoreError> {
        let value: Slot = Arc::new(items);
        self.request(|respond_to| StoreRequest::Set {
            key,
            value,
            respond_to,
        })
        .await
    }

    pub async fn exists(&self, key: StateKey) -> Result<bool, StoreError> {
        self.request(|respond_to| StoreRequest::Exists { key, respond_to })
            .await
    }

    /// Returns the collection under `key`, generating it first if it is absent.
    ///
    /// `generator` runs on the blocking pool while the actor keeps serving other keys.
    /// Concurrent first accesses share a single generation. When a collection already
    /// exists, `length` and `args` are ignored.
    pub async fn get_or_generate<T, A, F>(
        &self,
        key: StateKey,
        generator: F,
        length: usize,
        args: A,
    ) -> Result<Arc<Vec<T>>, StoreError>
    where
        T: Send + Sync + 'static,
        A: Send + 'static,
        F: FnOnce(usize, A) -> Vec<T> + Send + 'static,
    {
        let generate = boxed_generator(generator, length, args);
        let slot = self
            .request(|respond_to| StoreRequest::GetOrGenerate {
                key,
                generate,
                respond_to,
            })
            .await?
            .ok_or_else(|| StoreError::Aborted(key.to_string()))?;
        downcast(key, slot)
    }

    /// Runs `f` against the collection under `key` as one uninterrupted step.
    ///
    /// The modified collection is installed only when `f` returns `Ok`; on `Err` the
    /// stored collection is left as it was.
    pub async fn modify<T, R, E, F>(&self, key: StateKey, f: F) -> Result<R, E>
    where
        T: Clone + Send + Sync + 'static,
        R: Send + 'static,
        E: From<StoreError> + Send + 'static,
        F: FnOnce(&mut Vec<T>) -> Result<R, E> + Send + 'static,
    {
        let (outcome_tx, outcome_rx) = oneshot::channel::<Result<R, E>>();
        let apply: Apply = Box::new(move |current: Option<Slot>| -> Option<Slot> {
            let (outcome, next) = match current.map(|slot| slot.downcast::<Vec<T>>()) {
                None => (Err(E::from(StoreError::NotFound(key.to_string()))), None),
                Some(Err(_)) => (Err(E::from(StoreError::Malformed(key.to_string()))), None),
                Some(Ok(items)) => {
                    let mut items = Arc::unwrap_or_clone(items);
                    match f(&mut items) {
                        Ok(value) => (Ok(value), Some(Arc::new(items) as Slot)),
                        Err(e) => (Err(e), None),
                    }
                }
            };
            let _ = outcome_tx.send(outcome);
            next
        });

        let completed = self
            .request(|respond_to| StoreRequest::Modify {
                key,
                apply,
                respond_to,
            })
            .await?;
        if !completed {
            return Err(E::from(StoreError::Aborted(key.to_string())));
        }
        outcome_rx
            .await
            .map_err(|_| E::from(StoreError::Aborted(key.to_string())))?
    }
}

/// Erases a typed generator into a closure that reports the generated length.
fn boxed_generator<T, A, F>(generator: F, length: usize, args: A) -> Generate
where
    T: Send + Sync + 'static,
    A: Send + 'static,
    F: FnOnce(usize, A) -> Vec<T> + Send + 'static,
{
    Box::new(move || {
        let items = generator(length, args);
        let len = items.len();
        (Arc::new(items) as Slot, len)
    })
}

fn downcast<T: Send + Sync + 'static>(key: StateKey, slot: Slot) -> Result<Arc<Vec<T>>, StoreError> {
    slot.downcast::<Vec<T>>()
        .map_err(|_| StoreError::Malformed(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const NUMBERS: StateKey = StateKey::new("numbers");

    fn spawn_store() -> StateStore {
        let (actor, store) = StoreActor::new(16);
        tokio::spawn(actor.run());
        store
    }

    #[tokio::test]
    async fn get_fails_when_absent() {
        let store = spawn_store();
        let result = store.get::<u32>(NUMBERS).await;
        assert_eq!(result.unwrap_err(), StoreError::NotFound("numbers".into()));
        assert!(!store.exists(NUMBERS).await.unwrap());
    }

    #[tokio::test]
    async fn set_replaces_collection() {
        let store = spawn_store();
        store.set(NUMBERS, vec![1u32, 2, 3]).await.unwrap();
        store.set(NUMBERS, vec![9u32]).await.unwrap();

        assert!(store.exists(NUMBERS).await.unwrap());
        assert_eq!(*store.get::<u32>(NUMBERS).await.unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn get_or_generate_ignores_length_on_cache_hit() {
        let store = spawn_store();
        let first = store
            .get_or_generate(NUMBERS, |n, _: ()| (0..n as u32).collect(), 3, ())
            .await
            .unwrap();
        let second = store
            .get_or_generate(NUMBERS, |n, _: ()| (0..n as u32).collect(), 10, ())
            .await
            .unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);
    }

    #[tokio::test]
    async fn concurrent_first_access_generates_once() {
        let store = spawn_store();
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = vec![];
        for _ in 0..20 {
            let store = store.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                store
                    .get_or_generate(
                        NUMBERS,
                        move |n, _: ()| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            vec![7u32; n]
                        },
                        5,
                        (),
                    )
                    .await
                    .unwrap()
                    .len()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 5);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn type_mismatch_is_malformed() {
        let store = spawn_store();
        store.set(NUMBERS, vec![1u32]).await.unwrap();

        let result = store.get::<String>(NUMBERS).await;
        assert_eq!(result.unwrap_err(), StoreError::Malformed("numbers".into()));
    }

    #[tokio::test]
    async fn modify_installs_only_on_success() {
        let store = spawn_store();
        store.set(NUMBERS, vec![1u32, 2]).await.unwrap();

        let len: Result<usize, StoreError> = store
            .modify(NUMBERS, |items: &mut Vec<u32>| {
                items.push(3);
                Ok(items.len())
            })
            .await;
        assert_eq!(len.unwrap(), 3);

        let rejected: Result<(), StoreError> = store
            .modify(NUMBERS, |items: &mut Vec<u32>| {
                items.clear();
                Err(StoreError::NotFound("nope".into()))
            })
            .await;
        assert!(rejected.is_err());
        assert_eq!(*store.get::<u32>(NUMBERS).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn concurrent_modifications_do_not_interleave() {
        let store = spawn_store();
        store.set(NUMBERS, Vec::<u32>::new()).await.unwrap();

        let mut handles = vec![];
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let next: Result<u32, StoreError> = store
                    .modify(NUMBERS, |items: &mut Vec<u32>| {
                        let next = items.iter().copied().max().unwrap_or(0) + 1;
                        items.push(next);
                        Ok(next)
                    })
                    .await;
                next.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut items = (*store.get::<u32>(NUMBERS).await.unwrap()).clone();
        items.sort_unstable();
        assert_eq!(items, (1..=50).collect::<Vec<u32>>());
    }

    #[test]
    fn generated_slot_reports_collection_length() {
        let generate = boxed_generator(
            |n, step: u32| -> Vec<u32> { (0..n as u32).map(|i| i * step).collect() },
            4,
            3,
        );
        let (slot, len) = generate();
        assert_eq!(len, 4);
        let items = downcast::<u32>(NUMBERS, slot).unwrap();
        assert_eq!(*items, vec![0, 3, 6, 9]);
    }

    #[tokio::test]
    async fn slow_generation_does_not_block_other_keys() {
        const OTHER: StateKey = StateKey::new("other");
        let store = spawn_store();
        let (release, gate) = std::sync::mpsc::channel::<()>();

        let generating = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .get_or_generate(
                        NUMBERS,
                        move |n, _: ()| {
                            let _ = gate.recv();
                            vec![1u32; n]
                        },
                        4,
                        (),
                    )
                    .await
            })
        };

        let other = tokio::time::timeout(Duration::from_secs(5), async {
            store.set(OTHER, vec![5u32]).await.unwrap();
            store.get::<u32>(OTHER).await.unwrap()
        })
        .await
        .expect("store blocked by generation");
        assert_eq!(*other, vec![5]);
        assert!(!store.exists(NUMBERS).await.unwrap());

        release.send(()).unwrap();
        assert_eq!(generating.await.unwrap().unwrap().len(), 4);
        assert!(store.exists(NUMBERS).await.unwrap());
    }

    #[tokio::test]
    async fn set_during_generation_wins() {
        let store = spawn_store();
        let (release, gate) = std::sync::mpsc::channel::<()>();

        let generating = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .get_or_generate(
                        NUMBERS,
                        move |n, _: ()| {
                            let _ = gate.recv();
                            vec![0u32; n]
                        },
                        3,
                        (),
                    )
                    .await
            })
        };
        tokio::task::yield_now().await;
        store.set(NUMBERS, vec![9u32]).await.unwrap();

        let _ = release.send(());
        assert_eq!(*generating.await.unwrap().unwrap(), vec![9]);
        assert_eq!(*store.get::<u32>(NUMBERS).await.unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn panicking_generator_aborts_without_killing_actor() {
        let store = spawn_store();
        let result = store
            .get_or_generate(NUMBERS, |_, _: ()| -> Vec<u32> { panic!("boom") }, 3, ())
            .await;
        assert_eq!(result.unwrap_err(), StoreError::Aborted("numbers".into()));

        assert!(!store.exists(NUMBERS).await.unwrap());
        store.set(NUMBERS, vec![1u32]).await.unwrap();
        assert_eq!(store.get::<u32>(NUMBERS).await.unwrap().len(), 1);
    }
}
