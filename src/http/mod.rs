//! # Request Adapter
//!
//! Translates HTTP requests into one collection call each, and the typed
//! result or error back into a status code and JSON body.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use handlers::{collection_routes, CollectionState};
pub use server::{app_router, HttpServer, ServerError};
