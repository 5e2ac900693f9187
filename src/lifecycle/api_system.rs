use crate::framework::{
    ControllerSettings, EndpointDescriptor, Resource, ResourceController, ResourceEndpoint,
    StateStore, StoreActor,
};
use crate::resources::{
    Analytic, Attendance, Chat, Crypto, CryptoTransaction, Employee, Expense, Feedback, Income,
    Medical, Notification, Order, OrderItem, Payment, Product, Todo, User,
};
use std::sync::Arc;
use tracing::{error, info};

/// Errors raised while composing or stopping the system.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SystemError {
    #[error("State key already registered: {0}")]
    DuplicateKey(String),

    #[error("Endpoint prefix already registered: {0}")]
    DuplicatePrefix(String),

    #[error("Store task failed: {0}")]
    TaskFailed(String),
}

/// The runtime orchestrator for the API.
///
/// `ApiSystem` is responsible for:
/// - **Lifecycle Management**: Spawning the store actor and stopping it on shutdown
/// - **Dependency Wiring**: Handing one shared [`StateStore`] to every controller
/// - **Registration**: Keeping the list of served resources, each with a distinct
///   state key and path prefix
///
/// # Example
///
/// ```ignore
/// let system = ApiSystem::new(64, ControllerSettings::default())?;
///
/// let users = system.controller::<User>();
/// let page = users.list(&[]).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ApiSystem {
    store: StateStore,
    settings: ControllerSettings,
    endpoints: Vec<Arc<dyn ResourceEndpoint>>,
    handle: tokio::task::JoinHandle<()>,
}

impl ApiSystem {
    /// Spawns the store actor and registers every built-in resource.
    pub fn new(buffer_size: usize, settings: ControllerSettings) -> Result<Self, SystemError> {
        let mut system = Self::empty(buffer_size, settings);
        system.register::<User>()?;
        system.register::<Employee>()?;
        system.register::<Product>()?;
        system.register::<Order>()?;
        system.register::<OrderItem>()?;
        system.register::<Todo>()?;
        system.register::<Payment>()?;
        system.register::<Notification>()?;
        system.register::<Medical>()?;
        system.register::<Income>()?;
        system.register::<Expense>()?;
        system.register::<Attendance>()?;
        system.register::<Chat>()?;
        system.register::<Analytic>()?;
        system.register::<Crypto>()?;
        system.register::<CryptoTransaction>()?;
        system.register::<Feedback>()?;
        info!(resources = system.endpoints.len(), "System ready");
        Ok(system)
    }

    /// Spawns the store actor with no resource registered.
    pub fn empty(buffer_size: usize, settings: ControllerSettings) -> Self {
        let (actor, store) = StoreActor::new(buffer_size);
        let handle = tokio::spawn(actor.run());
        Self {
            store,
            settings,
            endpoints: Vec::new(),
            handle,
        }
    }

    /// Adds a controller for `T`.
    ///
    /// Fails when another resource already uses `T`'s state key or path prefix.
    pub fn register<T: Resource>(&mut self) -> Result<(), SystemError> {
        for endpoint in &self.endpoints {
            if endpoint.key() == T::KEY {
                return Err(SystemError::DuplicateKey(T::KEY.to_string()));
            }
            if endpoint.descriptor().prefix == T::PREFIX {
                return Err(SystemError::DuplicatePrefix(T::PREFIX.to_string()));
            }
        }
        self.endpoints.push(Arc::new(self.controller::<T>()));
        info!(key = %T::KEY, prefix = T::PREFIX, "Registered");
        Ok(())
    }

    /// A typed controller for `T` sharing this system's store.
    pub fn controller<T: Resource>(&self) -> ResourceController<T> {
        ResourceController::new(self.store.clone(), self.settings)
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn endpoints(&self) -> &[Arc<dyn ResourceEndpoint>] {
        &self.endpoints
    }

    pub fn descriptors(&self) -> Vec<EndpointDescriptor> {
        self.endpoints.iter().map(|e| e.descriptor()).collect()
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops this system's handles to the store, then waits for the store actor to
    /// drain its channel and exit. Controllers handed out by [`ApiSystem::controller`]
    /// or routers built from [`ApiSystem::endpoints`] keep the store alive until they
    /// are dropped too.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.endpoints);
        drop(self.store);

        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(SystemError::TaskFailed(e.to_string()));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
