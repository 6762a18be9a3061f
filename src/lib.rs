//! # CRUD Recipe
//!
//! > **Resource collections served over HTTP, one actor per collection.**
//!
//! Each collection (books, employees) is a keyed, insertion-ordered set of
//! records with List/Get/Create/Update/Delete. The collection lives inside a
//! `ResourceActor` running in its own Tokio task; handlers talk to it through a
//! cloneable `ResourceClient`.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why one actor per collection?
//! The actor processes its mailbox sequentially, so it is the single lock over
//! its collection: every operation is linearizable, readers never see a record
//! halfway through an update, and no `Mutex` appears anywhere in the core.
//!
//! ### Generics: The Power of `T`
//! `ResourceActor<T: Entity>` is written once and serves every record type.
//! A record type only supplies its ID type, its create/update payloads and
//! validation hooks.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Every operation resolves to a [`FrameworkError`](framework::FrameworkError)
//! kind. Entity validation errors (`BookError`, `EmployeeError`) travel inside
//! `InvalidInput`; the HTTP layer maps kinds to status codes.
//!
//! ### 2. Deadlines and Cancellation
//! Each request carries [`RequestOptions`](framework::RequestOptions). When the
//! deadline passes, its token fires, or the caller hangs up, the actor abandons
//! the store call it was awaiting.
//!
//! ### 3. Identifiers
//! Sequential, random or store-assigned per collection, and never reused.
//!
//! ### 4. Observability
//! `tracing` everywhere with an `entity_type` field on actor events. See the
//! [`lifecycle::tracing`] module.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic actor, client, store seam and identifier policies.
//!
//! ### 2. The Records ([`model`], [`book_actor`], [`employee_actor`])
//! Data types and their `Entity` implementations.
//!
//! ### 3. The Adapter ([`http`])
//! axum routes, handlers and the error-to-status mapping.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! Configuration, actor startup and shutdown, logging setup.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --port 8080
//! curl -X POST localhost:8080/books -d '{"isbn":"1234","title":"Book Title 1"}' \
//!      -H 'content-type: application/json'
//! ```

pub mod book_actor;
pub mod config;
pub mod employee_actor;
pub mod framework;
pub mod http;
pub mod lifecycle;
pub mod model;
