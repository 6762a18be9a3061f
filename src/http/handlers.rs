//! Generic CRUD handlers, instantiated once per collection.

use super::error::ApiError;
use crate::framework::{Entity, RequestOptions, ResourceClient};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;

/// Router state for one collection.
pub struct CollectionState<T: Entity> {
    pub client: ResourceClient<T>,
    /// Deadline for each collection call, measured from when the handler starts.
    pub request_timeout: Duration,
}

impl<T: Entity> Clone for CollectionState<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

impl<T: Entity> CollectionState<T> {
    pub fn new(client: ResourceClient<T>, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
        }
    }

    fn options(&self) -> RequestOptions {
        RequestOptions::new().with_timeout(self.request_timeout)
    }
}

/// Routes for one collection, to be nested under its path:
///
/// | Method | Path   | Result                     |
/// |--------|--------|----------------------------|
/// | GET    | `/`    | 200, every record in order |
/// | POST   | `/`    | 201, the created record    |
/// | GET    | `/:id` | 200, the record            |
/// | PUT    | `/:id` | 200, the updated record    |
/// | DELETE | `/:id` | 200, the removed record    |
pub fn collection_routes<T>(state: CollectionState<T>) -> Router
where
    T: Entity + Serialize,
    T::Create: DeserializeOwned,
    T::Update: DeserializeOwned,
{
    Router::new()
        .route("/", get(list_handler::<T>).post(create_handler::<T>))
        .route(
            "/:id",
            get(get_handler::<T>)
                .put(update_handler::<T>)
                .delete(delete_handler::<T>),
        )
        .with_state(state)
}

fn parse_id<T: Entity>(raw: String) -> Result<T::Id, ApiError> {
    T::Id::from_str(&raw).map_err(|_| ApiError::Identifier(raw))
}

async fn list_handler<T: Entity + Serialize>(
    State(state): State<CollectionState<T>>,
) -> Result<Json<Vec<T>>, ApiError> {
    let records = state.client.list_with(state.options()).await?;
    Ok(Json(records))
}

async fn get_handler<T: Entity + Serialize>(
    State(state): State<CollectionState<T>>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError> {
    let id = parse_id::<T>(id)?;
    let record = state.client.get_with(id, state.options()).await?;
    Ok(Json(record))
}

async fn create_handler<T>(
    State(state): State<CollectionState<T>>,
    payload: Result<Json<T::Create>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), ApiError>
where
    T: Entity + Serialize,
    T::Create: DeserializeOwned,
{
    let Json(params) = payload?;
    let record = state.client.create_with(params, state.options()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_handler<T>(
    State(state): State<CollectionState<T>>,
    Path(id): Path<String>,
    payload: Result<Json<T::Update>, JsonRejection>,
) -> Result<Json<T>, ApiError>
where
    T: Entity + Serialize,
    T::Update: DeserializeOwned,
{
    let id = parse_id::<T>(id)?;
    let Json(update) = payload?;
    let record = state.client.update_with(id, update, state.options()).await?;
    Ok(Json(record))
}

async fn delete_handler<T: Entity + Serialize>(
    State(state): State<CollectionState<T>>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError> {
    let id = parse_id::<T>(id)?;
    let record = state.client.delete_with(id, state.options()).await?;
    Ok(Json(record))
}
