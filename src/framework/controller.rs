//! # Generic Resource Controller
//!
//! [`ResourceController<T>`] is the per-resource facade. It is written once and
//! parameterized by a [`Resource`] type; only the schema and the generator differ
//! between resources.
//!
//! ## Operations
//!
//! | Operation | Behaviour |
//! |---|---|
//! | List | lazily generates `pageSize` records, filters, counts, paginates |
//! | Retrieve | validates the identifier token, then searches the full collection |
//! | Create | strips `id`/`uuid`, assigns `max(id) + 1` and a fresh uuid, validates, appends |
//! | Update | replaces every non-identity field of an existing record |
//! | PartialUpdate | overlays the supplied fields onto the existing record |
//! | Regenerate | replaces the whole collection unconditionally |
//!
//! Writes run inside [`StateStore::modify`], so "read max id, validate, append" is a
//! single step of the store actor and concurrent creates never share an id.
//!
//! ## Dynamic Dispatch
//!
//! The hosting layer holds controllers of different record types side by side through
//! the object-safe [`ResourceEndpoint`] trait, which speaks JSON values only.

use crate::framework::error::{FrameworkError, StoreError};
use crate::framework::filters::FilterSet;
use crate::framework::query::{to_row, QuerySet};
use crate::framework::resource::{GeneratorArgs, Resource};
use crate::framework::routes::{
    capitalize, resource_routes, EndpointDescriptor, Identifier, Operation, Route, RouteRequest,
};
use crate::framework::schema::Schema;
use crate::framework::store::{StateKey, StateStore};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// A collection generator: `(length, args) -> records`.
pub type Generator<T> = Arc<dyn Fn(usize, &GeneratorArgs) -> Vec<T> + Send + Sync>;

/// Per-controller tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// `pageSize` used by List when the caller gives none.
    pub default_page_size: usize,
    /// Collection size generated on first access by Retrieve and the write paths.
    pub default_length: usize,
    /// Collection size used by Regenerate when the caller gives none.
    pub regenerate_length: usize,
    /// Largest collection a single request may materialize, through `pageSize` or `length`.
    pub max_length: usize,
    pub seed: Option<u64>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            default_length: 50,
            regenerate_length: 100,
            max_length: 10_000,
            seed: None,
        }
    }
}

/// List envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: usize,
    #[serde(rename = "pageSize")]
    pub page_size: usize,
    /// Number of records matching the filters, before pagination.
    pub total: usize,
    pub results: Vec<T>,
}

/// Regenerate confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regenerated {
    pub message: String,
    pub count: usize,
}

/// Failure inside a store modification: either the store itself or the record.
enum WriteFailure {
    Store(StoreError),
    Rejected(FrameworkError),
}

impl From<StoreError> for WriteFailure {
    fn from(error: StoreError) -> Self {
        WriteFailure::Store(error)
    }
}

impl From<FrameworkError> for WriteFailure {
    fn from(error: FrameworkError) -> Self {
        WriteFailure::Rejected(error)
    }
}

impl From<WriteFailure> for FrameworkError {
    fn from(failure: WriteFailure) -> Self {
        match failure {
            WriteFailure::Store(error) => FrameworkError::on_write(error),
            WriteFailure::Rejected(error) => error,
        }
    }
}

// =============================================================================
// THE CONTROLLER
// =============================================================================

pub struct ResourceController<T: Resource> {
    store: StateStore,
    schema: Arc<Schema>,
    filters: FilterSet,
    generator: Generator<T>,
    settings: ControllerSettings,
}

impl<T: Resource> Clone for ResourceController<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            schema: self.schema.clone(),
            filters: self.filters.clone(),
            generator: self.generator.clone(),
            settings: self.settings,
        }
    }
}

impl<T: Resource> ResourceController<T> {
    /// Builds the controller and derives its filter surface from `T::schema()`.
    pub fn new(store: StateStore, settings: ControllerSettings) -> Self {
        let schema = T::schema();
        let filters = FilterSet::derive(&schema);
        let generator: Generator<T> = Arc::new(T::generate);
        Self {
            store,
            schema: Arc::new(schema),
            filters,
            generator,
            settings,
        }
    }

    /// Replaces the generator collaborator.
    pub fn with_generator(
        mut self,
        generator: impl Fn(usize, &GeneratorArgs) -> Vec<T> + Send + Sync + 'static,
    ) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    pub fn key(&self) -> StateKey {
        T::KEY
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn filter_set(&self) -> &FilterSet {
        &self.filters
    }

    pub fn settings(&self) -> ControllerSettings {
        self.settings
    }

    pub fn routes(&self) -> Vec<Route> {
        resource_routes(T::PREFIX, T::VERBOSE_NAME, T::VERBOSE_NAME_PLURAL)
    }

    pub fn descriptor(&self) -> EndpointDescriptor {
        EndpointDescriptor {
            name: T::VERBOSE_NAME_PLURAL,
            prefix: T::PREFIX,
            route_name: format!("{}-list", T::PREFIX.trim_start_matches('/')),
            description: T::DESCRIPTION,
            params: self.filters.params(),
            routes: self.routes(),
        }
    }

    fn args(&self) -> GeneratorArgs {
        GeneratorArgs {
            seed: self.settings.seed,
        }
    }

    /// The collection, generated with `length` records if it was never materialized.
    async fn collection(&self, length: usize) -> Result<Arc<Vec<T>>, FrameworkError> {
        let generator = self.generator.clone();
        let items = self
            .store
            .get_or_generate(
                T::KEY,
                move |n, args: GeneratorArgs| generator(n, &args),
                length,
                self.args(),
            )
            .await?;
        Ok(items)
    }

    fn not_found(&self) -> FrameworkError {
        FrameworkError::NotFound(format!("{} not found", capitalize(T::VERBOSE_NAME)))
    }

    fn identify(&self, token: &str) -> Result<Identifier, FrameworkError> {
        Identifier::parse(token).ok_or_else(|| {
            debug!(token, "Not an identifier");
            self.not_found()
        })
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Filtered, ordered, paginated view of the collection.
    ///
    /// Recognized parameters: `page`, `pageSize`, `ordering` and every filterable field.
    /// Anything else is ignored.
    #[instrument(skip(self, query), fields(resource = T::VERBOSE_NAME_PLURAL))]
    pub async fn list(&self, query: &[(String, String)]) -> Result<Page<T>, FrameworkError> {
        let page = positive_param(query, "page", usize::MAX)?.unwrap_or(1);
        let page_size = positive_param(query, "pageSize", self.settings.max_length)?
            .unwrap_or(self.settings.default_page_size);
        let ordering = self.ordering(query)?;
        let filters = self.filters.extract(query)?;

        let items = self.collection(page_size).await?;
        let mut view = QuerySet::new(&items);
        if !filters.is_empty() {
            view = view.retain_rows(|row| filters.matches(row));
        }
        if !ordering.is_empty() {
            view = view.order_by(&ordering);
        }

        let total = view.count();
        let results = view.paginate(page, page_size).into_vec();
        info!(page, page_size, total, returned = results.len(), "List");
        Ok(Page {
            page,
            page_size,
            total,
            results,
        })
    }

    /// Parses `ordering=a,-b` against the schema's fields.
    fn ordering<'q>(&self, query: &'q [(String, String)]) -> Result<Vec<&'q str>, FrameworkError> {
        let Some((_, raw)) = query.iter().rev().find(|(k, _)| k == "ordering") else {
            return Ok(Vec::new());
        };
        let fields: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        for field in &fields {
            let name = field.strip_prefix('-').unwrap_or(field);
            if self.schema.field(name).is_none() {
                return Err(FrameworkError::ValidationError(format!(
                    "Unknown ordering field '{name}'"
                )));
            }
        }
        Ok(fields)
    }

    /// Looks a record up by `id` or `uuid` in the full, unfiltered collection.
    #[instrument(skip(self), fields(resource = T::VERBOSE_NAME_PLURAL))]
    pub async fn retrieve(&self, token: &str) -> Result<T, FrameworkError> {
        let identifier = self.identify(token)?;
        let items = self.collection(self.settings.default_length).await?;
        let record = items
            .iter()
            .find(|r| identifier.matches(r.id(), r.uuid()))
            .cloned()
            .ok_or_else(|| self.not_found())?;
        debug!(%identifier, "Retrieved");
        Ok(record)
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Appends a new record with server-assigned identity.
    #[instrument(skip(self, payload), fields(resource = T::VERBOSE_NAME_PLURAL))]
    pub async fn create(&self, payload: Value) -> Result<T, FrameworkError> {
        let mut candidate = into_object(payload)?;
        candidate.remove("id");
        candidate.remove("uuid");

        self.collection(self.settings.default_length).await?;
        let schema = self.schema.clone();
        let record = self
            .store
            .modify(T::KEY, move |items: &mut Vec<T>| -> Result<T, WriteFailure> {
                let id = items.iter().map(T::id).max().map_or(1, |max| max + 1);
                candidate.insert("id".into(), Value::from(id));
                candidate.insert("uuid".into(), Value::String(Uuid::new_v4().to_string()));
                let record: T = schema.validate(candidate)?;
                items.push(record.clone());
                Ok(record)
            })
            .await
            .map_err(FrameworkError::from)
            .inspect_err(|e| warn!(error = %e, "Create failed"))?;

        info!(id = record.id(), uuid = %record.uuid(), "Created");
        Ok(record)
    }

    /// Replaces every non-identity field of the record at `token`.
    #[instrument(skip(self, payload), fields(resource = T::VERBOSE_NAME_PLURAL))]
    pub async fn update(&self, token: &str, payload: Value) -> Result<T, FrameworkError> {
        let candidate = into_object(payload)?;
        self.replace(token, move |_original| candidate).await
    }

    /// Overlays the supplied fields onto the record at `token`.
    #[instrument(skip(self, payload), fields(resource = T::VERBOSE_NAME_PLURAL))]
    pub async fn partial_update(&self, token: &str, payload: Value) -> Result<T, FrameworkError> {
        let changes = into_object(payload)?;
        self.replace(token, move |original| {
            let mut merged = to_row(original);
            merged.extend(changes);
            merged
        })
        .await
    }

    /// Builds a replacement from the original record, restores its identity,
    /// validates it and swaps it in place.
    async fn replace<F>(&self, token: &str, build: F) -> Result<T, FrameworkError>
    where
        F: FnOnce(&T) -> Map<String, Value> + Send + 'static,
    {
        let identifier = self.identify(token)?;
        self.collection(self.settings.default_length).await?;

        let schema = self.schema.clone();
        let missing = self.not_found();
        let record = self
            .store
            .modify(T::KEY, move |items: &mut Vec<T>| -> Result<T, WriteFailure> {
                let index = items
                    .iter()
                    .position(|r| identifier.matches(r.id(), r.uuid()))
                    .ok_or(missing)?;
                let original = &items[index];
                let mut candidate = build(original);
                candidate.insert("id".into(), Value::from(original.id()));
                candidate.insert("uuid".into(), Value::String(original.uuid().to_string()));
                let record: T = schema.validate(candidate)?;
                items[index] = record.clone();
                Ok(record)
            })
            .await
            .map_err(FrameworkError::from)
            .inspect_err(|e| warn!(%identifier, error = %e, "Update failed"))?;

        info!(%identifier, "Updated");
        Ok(record)
    }

    /// Discards the collection and installs `length` freshly generated records.
    #[instrument(skip(self), fields(resource = T::VERBOSE_NAME_PLURAL))]
    pub async fn regenerate(&self, length: Option<usize>) -> Result<Regenerated, FrameworkError> {
        let length = length.unwrap_or(self.settings.regenerate_length);
        if length < 1 {
            return Err(FrameworkError::ValidationError(
                "length must be greater than or equal to 1".into(),
            ));
        }
        if length > self.settings.max_length {
            return Err(FrameworkError::ValidationError(format!(
                "length must be less than or equal to {}",
                self.settings.max_length
            )));
        }

        let generator = self.generator.clone();
        let args = self.args();
        let items = tokio::task::spawn_blocking(move || generator(length, &args))
            .await
            .map_err(|e| {
                warn!(error = %e, "Generator failed");
                FrameworkError::from(StoreError::Aborted(T::KEY.to_string()))
            })?;
        let count = items.len();
        self.store.set(T::KEY, items).await?;

        info!(count, "Regenerated");
        Ok(Regenerated {
            message: format!("{count} {} regenerated.", T::VERBOSE_NAME_PLURAL.to_lowercase()),
            count,
        })
    }
}

// =============================================================================
// TYPE-ERASED ENDPOINT
// =============================================================================

/// Object-safe view of a controller for the hosting layer.
#[async_trait]
pub trait ResourceEndpoint: Send + Sync {
    fn key(&self) -> StateKey;

    fn descriptor(&self) -> EndpointDescriptor;

    /// Runs `operation` and returns its JSON response body.
    async fn handle(
        &self,
        operation: Operation,
        request: RouteRequest,
    ) -> Result<Value, FrameworkError>;
}

#[async_trait]
impl<T: Resource> ResourceEndpoint for ResourceController<T> {
    fn key(&self) -> StateKey {
        T::KEY
    }

    fn descriptor(&self) -> EndpointDescriptor {
        ResourceController::descriptor(self)
    }

    async fn handle(
        &self,
        operation: Operation,
        request: RouteRequest,
    ) -> Result<Value, FrameworkError> {
        let token = match (operation.is_detail(), request.token.as_deref()) {
            (true, Some(token)) => token,
            (true, None) => return Err(self.not_found()),
            (false, _) => "",
        };

        match operation {
            Operation::List => to_json(&self.list(&request.query).await?),
            Operation::Retrieve => to_json(&self.retrieve(token).await?),
            Operation::Create => to_json(&self.create(require_body(request.body)?).await?),
            Operation::Update => to_json(&self.update(token, require_body(request.body)?).await?),
            Operation::PartialUpdate => {
                to_json(&self.partial_update(token, require_body(request.body)?).await?)
            }
            Operation::Regenerate => {
                let length = positive_param(&request.query, "length", usize::MAX)?;
                to_json(&self.regenerate(length).await?)
            }
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Reads `key` as an integer in `1..=max`. Absent or empty means `None`.
fn positive_param(
    query: &[(String, String)],
    key: &str,
    max: usize,
) -> Result<Option<usize>, FrameworkError> {
    let Some((_, raw)) = query.iter().rev().find(|(k, _)| k == key) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.trim().parse::<usize>() {
        Ok(value) if value > max => Err(FrameworkError::ValidationError(format!(
            "{key} must be less than or equal to {max}"
        ))),
        Ok(value) if value >= 1 => Ok(Some(value)),
        _ => Err(FrameworkError::ValidationError(format!(
            "{key} must be an integer greater than or equal to 1"
        ))),
    }
}

fn into_object(payload: Value) -> Result<Map<String, Value>, FrameworkError> {
    match payload {
        Value::Object(map) => Ok(map),
        other => Err(FrameworkError::ValidationError(format!(
            "Expected a JSON object, got {}",
            kind_name(&other)
        ))),
    }
}

fn require_body(body: Option<Value>) -> Result<Value, FrameworkError> {
    body.ok_or_else(|| FrameworkError::ValidationError("Request body is required".into()))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn to_json<S: Serialize>(value: &S) -> Result<Value, FrameworkError> {
    serde_json::to_value(value)
        .map_err(|e| FrameworkError::ServiceUnavailable(format!("Could not serialize response: {e}")))
}
