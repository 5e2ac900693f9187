//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the API server.
//!
//! ## Overview
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! Controller operations open a span carrying the `resource` field, so every event
//! emitted while serving a request is attributed to its resource.
//!
//! ## Configuration
//!
//! The subscriber uses a compact format that hides the crate/module prefix
//! (`with_target(false)`). The level comes from `RUST_LOG` when it is set; otherwise
//! `--verbose` selects `debug` and the default is `info`.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: `Store started`, `Shutdown` with the final slot count
//! - **Generation**: `Generated` on first access, cache hits at debug level
//! - **Operations**: List, Retrieve, Create, Update and Regenerate with identifiers
//! - **Errors**: Failed writes with the error message
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! cargo run
//!
//! # Cache hits, filter extraction and identifier rejections
//! cargo run -- --verbose
//!
//! # Filter to the store only
//! RUST_LOG=fakedata_api::framework::store=debug cargo run
//! ```
//!
//! ## Request Trace Example
//!
//! **With `--verbose`**:
//!
//! ```text
//! DEBUG list{resource="users"}: Filters extracted filters=1
//! INFO Generated key=users len=10
//! INFO list{resource="users"}: List page=1 page_size=10 total=3 returned=3
//! DEBUG retrieve{token="abc" resource="users"}: Not an identifier token="abc"
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, at process start.
pub fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
