//! # Fake Data API
//!
//! > **Lazily generated fake collections behind one uniform CRUD surface.**
//!
//! Every resource (users, employees, products, orders, order items, todos, payments and
//! notifications) is served through the same generic engine. A collection is generated
//! the first time it is needed, cached in a process-wide store, and then listed, filtered,
//! ordered, paginated and edited in memory.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One engine, many records
//! You'll see `ResourceController<T: Resource>` everywhere. A record type declares its
//! key, path prefix, schema and generator once; the controller supplies list, retrieve,
//! create, update, partial update and regenerate for it.
//!
//! ### One owner for shared state
//! All collections live in a single [`StoreActor`](framework::StoreActor) task. Requests
//! are processed sequentially, so a collection is generated at most once even under
//! concurrent first access, and every write is a read-modify-write that no other request
//! can interleave with.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Store failures are [`StoreError`](framework::StoreError); everything a caller can see
//! is a [`FrameworkError`](framework::FrameworkError), which carries its own status code.
//!
//! ### 2. Schema-Driven Surface
//! A [`Schema`](framework::Schema) lists a record's fields and validation rules. The
//! filter parameters, the ordering whitelist and the validation of writes are all derived
//! from it.
//!
//! ### 3. Observability
//! Controller operations open a span tagged with the resource name.
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Store actor, query engine, schema validation, filters and the generic controller.
//! - **Key items**: [`Resource`](framework::Resource), [`ResourceController`](framework::ResourceController).
//!
//! ### 2. The Records ([`resources`])
//! - **Role**: Concrete record types with their schemas and fake-data generators.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! - **Role**: Configuration, tracing setup, and the [`ApiSystem`](lifecycle::ApiSystem)
//!   that owns the store and registers every resource.
//!
//! ### 4. The Transport ([`http`])
//! - **Role**: Mounts every endpoint's route table on an axum router.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! cargo run -- --port 8000 --seed 42
//! curl 'http://127.0.0.1:8000/users?page=1&pageSize=5&first_name=ann'
//! ```

pub mod framework;
pub mod http;
pub mod lifecycle;
pub mod resources;

pub use http::build_router;
