//! Generic resource engine.
//!
//! This module provides the building blocks shared by every resource: a keyed state
//! store run as an actor, an in-memory query engine, schema-derived filters and the
//! generic controller that ties them together.
//!
//! # Main Components
//!
//! - [`StoreActor`] / [`StateStore`] - Process-wide cache of materialized collections
//! - [`QuerySet`] - Lookup operators, ordering and pagination over a collection
//! - [`Schema`] / [`FilterSet`] - Field metadata, validation rules and the derived filter surface
//! - [`Resource`] - Trait that record types implement to be served
//! - [`ResourceController`] - List, retrieve, create, update, partial update and regenerate
//! - [`FrameworkError`] - Error taxonomy with transport status codes

pub mod controller;
pub mod error;
pub mod filters;
pub mod query;
pub mod resource;
pub mod routes;
pub mod schema;
pub mod store;

pub use controller::{ControllerSettings, Page, Regenerated, ResourceController, ResourceEndpoint};
pub use error::{FrameworkError, StoreError};
pub use filters::{FilterRequest, FilterSet, ParamSpec};
pub use query::{Filter, Lookup, QuerySet};
pub use resource::{GeneratorArgs, Resource};
pub use routes::{
    EndpointDescriptor, Identifier, Method, Operation, Route, RouteRequest, IDENTIFIER_PARAM,
};
pub use schema::{FieldKind, FieldSpec, Rule, Schema};
pub use store::{StateKey, StateStore, StoreActor};
