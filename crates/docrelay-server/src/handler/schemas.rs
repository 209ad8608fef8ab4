//! Schema registry CRUD endpoints (§4.3, §6).

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use docrelay_core::domain::Schema;
use docrelay_queue::SchemaRegistry;

use crate::handler::error::Result;
use crate::state::AppState;

/// Builds the router fragment for schema CRUD endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/schemas", post(put_schema).get(list_schemas))
        .route("/api/schemas/{name}", get(get_schema).delete(delete_schema))
}

#[derive(Debug, Deserialize)]
struct PutSchemaRequest {
    name: String,
    content: Value,
}

#[derive(Debug, Serialize)]
struct StatusOnlyResponse {
    status: &'static str,
}

async fn put_schema(
    State(schemas): State<SchemaRegistry>,
    Json(body): Json<PutSchemaRequest>,
) -> Result<Json<StatusOnlyResponse>> {
    schemas
        .put(&body.name, body.content)
        .await
        .map_err(docrelay_core::Error::from)?;
    tracing::info!(target: crate::TRACING_TARGET, name = %body.name, "Schema created");
    Ok(Json(StatusOnlyResponse { status: "created" }))
}

async fn get_schema(
    State(schemas): State<SchemaRegistry>,
    Path(name): Path<String>,
) -> Result<Json<Schema>> {
    let schema = schemas.get(&name).await.map_err(docrelay_core::Error::from)?;
    Ok(Json(schema))
}

async fn delete_schema(
    State(schemas): State<SchemaRegistry>,
    Path(name): Path<String>,
) -> Result<Json<StatusOnlyResponse>> {
    schemas.delete(&name).await.map_err(docrelay_core::Error::from)?;
    Ok(Json(StatusOnlyResponse { status: "deleted" }))
}

#[derive(Debug, Serialize)]
struct ListSchemasResponse {
    schemas: Vec<String>,
}

async fn list_schemas(State(schemas): State<SchemaRegistry>) -> Result<Json<ListSchemasResponse>> {
    let names = schemas.list().await.map_err(docrelay_core::Error::from)?;
    Ok(Json(ListSchemasResponse { schemas: names }))
}
