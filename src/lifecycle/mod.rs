//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for running the API process:
//!
//! - **Configuration**: Command-line flags and the controller settings derived from them
//! - **System orchestration**: Spawning the store actor and registering every resource
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`Config`] - Parsed command-line configuration
//! - [`ApiSystem`] - Owns the store actor and the registered resource endpoints
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod api_system;
pub mod config;
pub mod tracing;

pub use api_system::*;
pub use config::*;
pub use self::tracing::*;
