//! Worker registration, heartbeat, lifecycle, and status endpoints (§4.2, §6).

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docrelay_queue::{Counters, HeartbeatCommand, QueueStore, ReportedStatus, WorkerRegistry, WorkerView};

use crate::handler::error::Result;
use crate::state::AppState;

/// Builds the router fragment for worker lifecycle endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/register-worker", post(register_worker))
        .route("/api/worker-heartbeat", post(worker_heartbeat))
        .route("/api/worker/stop/{id}", post(stop_worker))
        .route("/api/worker/start/{id}", post(start_worker))
        .route("/api/force-remove-worker/{id}", delete(force_remove_worker))
        .route("/api/worker/{id}", get(get_worker))
        .route("/api/system-status", get(system_status))
}

#[derive(Debug, Deserialize)]
struct RegisterWorkerRequest {
    worker_name: String,
    api_url: String,
    model: String,
    #[serde(default)]
    api_key: String,
    process_id: Option<u32>,
}

#[derive(Debug, Serialize)]
struct RegisterWorkerResponse {
    status: &'static str,
    worker_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<&'static str>,
}

async fn register_worker(
    State(workers): State<WorkerRegistry>,
    Json(body): Json<RegisterWorkerRequest>,
) -> Result<Json<RegisterWorkerResponse>> {
    let worker = workers
        .register(
            &body.worker_name,
            &body.api_url,
            &body.model,
            &body.api_key,
            body.process_id,
        )
        .await
        .map_err(docrelay_core::Error::from)?;

    let warning = worker
        .needs_api_key_warning()
        .then_some("api_url references the OpenAI host but no api_key was provided");

    tracing::info!(target: crate::TRACING_TARGET, worker_id = %worker.id, name = %worker.name, "Worker registered");
    Ok(Json(RegisterWorkerResponse {
        status: "registered",
        worker_id: worker.id,
        warning,
    }))
}

#[derive(Debug, Deserialize)]
struct HeartbeatRequest {
    worker_id: Uuid,
    status: ReportedStatus,
    document_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct HeartbeatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'static str>,
}

async fn worker_heartbeat(
    State(workers): State<WorkerRegistry>,
    Json(body): Json<HeartbeatRequest>,
) -> Result<Json<HeartbeatResponse>> {
    let command = workers
        .heartbeat(body.worker_id, body.status, body.document_id)
        .await
        .map_err(docrelay_core::Error::from)?;

    let command = match command {
        HeartbeatCommand::Ok => None,
        HeartbeatCommand::Stop => Some("stop"),
        HeartbeatCommand::Shutdown => Some("shutdown"),
    };
    Ok(Json(HeartbeatResponse { command }))
}

#[derive(Debug, Serialize)]
struct StatusOnlyResponse {
    status: &'static str,
}

async fn stop_worker(
    State(workers): State<WorkerRegistry>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusOnlyResponse>> {
    workers.stop(id).await.map_err(docrelay_core::Error::from)?;
    Ok(Json(StatusOnlyResponse { status: "stopped" }))
}

async fn start_worker(
    State(workers): State<WorkerRegistry>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusOnlyResponse>> {
    workers.start(id).await.map_err(docrelay_core::Error::from)?;
    Ok(Json(StatusOnlyResponse { status: "started" }))
}

async fn force_remove_worker(
    State(workers): State<WorkerRegistry>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusOnlyResponse>> {
    workers.force_remove(id).await.map_err(docrelay_core::Error::from)?;
    Ok(Json(StatusOnlyResponse { status: "removed" }))
}

async fn get_worker(
    State(workers): State<WorkerRegistry>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkerView>> {
    let worker = workers.get_view(id).await.map_err(docrelay_core::Error::from)?;
    Ok(Json(worker))
}

#[derive(Debug, Serialize)]
struct SystemStatusResponse {
    pending_count: u64,
    processing_count: u64,
    processed_total: u64,
    errors_total: u64,
    workers: Vec<WorkerView>,
}

async fn system_status(
    State(queue): State<QueueStore>,
    State(counters): State<Counters>,
    State(workers): State<WorkerRegistry>,
) -> Result<Json<SystemStatusResponse>> {
    let pending_count = queue.pending_count().await.map_err(docrelay_core::Error::from)?;
    let processing_count = queue.processing_count().await.map_err(docrelay_core::Error::from)?;
    let processed_total = counters.processed_total().await.map_err(docrelay_core::Error::from)?;
    let errors_total = counters.errors_total().await.map_err(docrelay_core::Error::from)?;
    let workers = workers.list_view().await.map_err(docrelay_core::Error::from)?;

    Ok(Json(SystemStatusResponse {
        pending_count,
        processing_count,
        processed_total,
        errors_total,
        workers,
    }))
}
