//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber once at startup.
//!
//! The format is compact and hides the module prefix (`with_target(false)`);
//! actor events carry an `entity_type` field instead, so a line reads
//! `INFO Created entity_type="Book" id=3`.
//!
//! `RUST_LOG` takes precedence over the configured level:
//!
//! ```bash
//! # Show full payloads of every request
//! RUST_LOG=debug crud-recipe
//!
//! # Quiet the HTTP layer, keep the actors verbose
//! RUST_LOG=tower_http=warn,crud_recipe=debug crud-recipe
//! ```
//!
//! With `debug`, each request's payload is logged once as it reaches the actor:
//!
//! ```text
//! DEBUG Create entity_type="Book" params=BookCreate { id: None, isbn: "1234", title: "Book Title 1", author: None }
//! INFO Created entity_type="Book" id=1
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
