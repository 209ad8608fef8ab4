//! Enqueue, dequeue, and completion endpoints (§4.4, §4.1, §4.5).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use docrelay_core::domain::Job;
use docrelay_queue::{Counters, QueueStore, WorkerRegistry};
use docrelay_results::{ResultRecord, ResultStore};

use crate::handler::error::{ErrorKind, Result};
use crate::state::AppState;

/// Builds the router fragment for document lifecycle endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/enqueue", post(enqueue))
        .route("/api/enqueue-folder", post(enqueue_folder))
        .route("/api/next-document/{worker_id}", get(next_document))
        .route("/api/document-processed", post(document_processed))
}

#[derive(Debug, Deserialize)]
struct EnqueueQuery {
    file_path: String,
    schema_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct EnqueueResponse {
    status: &'static str,
    id: Uuid,
}

async fn enqueue(
    State(queue): State<QueueStore>,
    Query(params): Query<EnqueueQuery>,
) -> Result<Json<EnqueueResponse>> {
    let job = Job::new(params.file_path, params.schema_name);
    let id = job.id;
    queue
        .enqueue(&job)
        .await
        .map_err(docrelay_core::Error::from)?;
    tracing::info!(target: crate::TRACING_TARGET, job_id = %id, "Document enqueued");
    Ok(Json(EnqueueResponse { status: "enqueued", id }))
}

#[derive(Debug, Deserialize)]
struct EnqueueFolderQuery {
    folder_path: String,
    schema_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct EnqueueFolderResponse {
    status: &'static str,
    count: usize,
}

async fn enqueue_folder(
    State(queue): State<QueueStore>,
    Query(params): Query<EnqueueFolderQuery>,
) -> Result<Json<EnqueueFolderResponse>> {
    let root = std::path::PathBuf::from(&params.folder_path);
    let metadata = tokio::fs::metadata(&root)
        .await
        .map_err(|_| ErrorKind::NotFound.with_message(format!("folder '{}' not found", params.folder_path)))?;
    if !metadata.is_dir() {
        return Err(ErrorKind::NotFound
            .with_message(format!("'{}' is not a directory", params.folder_path))
            .into());
    }

    let files = collect_files_recursively(&root)
        .await
        .map_err(|e| ErrorKind::Internal.with_message(e.to_string()))?;

    // All-or-nothing: jobs are only persisted after every file is discovered.
    let jobs: Vec<Job> = files
        .into_iter()
        .map(|path| Job::new(path.to_string_lossy().into_owned(), params.schema_name.clone()))
        .collect();

    for job in &jobs {
        queue.enqueue(job).await.map_err(docrelay_core::Error::from)?;
    }

    tracing::info!(
        target: crate::TRACING_TARGET,
        folder = %params.folder_path,
        count = jobs.len(),
        "Folder enqueued"
    );
    Ok(Json(EnqueueFolderResponse {
        status: "enqueued",
        count: jobs.len(),
    }))
}

fn collect_files_recursively(
    root: &std::path::Path,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = std::io::Result<Vec<std::path::PathBuf>>> + Send + '_>> {
    Box::pin(async move {
        let mut out = Vec::new();
        let mut entries = tokio::fs::read_dir(root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                out.extend(collect_files_recursively(&path).await?);
            } else if file_type.is_file() {
                out.push(path);
            }
        }
        Ok(out)
    })
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum NextDocumentResponse {
    Document { status: &'static str, document: Job },
    Empty { status: &'static str },
}

async fn next_document(
    State(workers): State<WorkerRegistry>,
    State(queue): State<QueueStore>,
    Path(worker_id): Path<Uuid>,
) -> Result<Json<NextDocumentResponse>> {
    // Refresh liveness unconditionally, even if this claim is about to be
    // rejected, before inspecting (pre-touch, unaffected) status.
    let worker = workers
        .touch_heartbeat(worker_id)
        .await
        .map_err(docrelay_core::Error::from)?;
    if matches!(
        worker.status,
        docrelay_core::domain::WorkerStatus::Stopped
            | docrelay_core::domain::WorkerStatus::Error
            | docrelay_core::domain::WorkerStatus::Removing
    ) {
        return Err(ErrorKind::State
            .with_message(format!("worker is not in an active state ({})", worker.status))
            .into());
    }

    match queue.claim(1).await.map_err(docrelay_core::Error::from)? {
        Some(job) => {
            workers
                .assign_document(worker_id, job.id)
                .await
                .map_err(docrelay_core::Error::from)?;
            Ok(Json(NextDocumentResponse::Document {
                status: "ok",
                document: job,
            }))
        }
        None => Ok(Json(NextDocumentResponse::Empty { status: "empty" })),
    }
}

#[derive(Debug, Deserialize)]
struct DocumentProcessedQuery {
    worker_id: Uuid,
    document_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct DocumentProcessedBody {
    is_error: bool,
    file_path: String,
    schema_name: Option<String>,
    result: Value,
}

#[derive(Debug, Serialize)]
struct DocumentProcessedResponse {
    status: &'static str,
}

async fn document_processed(
    State(queue): State<QueueStore>,
    State(workers): State<WorkerRegistry>,
    State(counters): State<Counters>,
    State(results): State<ResultStore>,
    Query(params): Query<DocumentProcessedQuery>,
    Json(body): Json<DocumentProcessedBody>,
) -> Result<Json<DocumentProcessedResponse>> {
    let record = ResultRecord::new(
        params.worker_id.to_string(),
        body.file_path,
        body.schema_name,
        body.result,
    );
    results
        .record(body.is_error, record)
        .await
        .map_err(docrelay_core::Error::from)?;

    // Idempotent: a retried completion re-runs every step below, which is
    // the accepted at-least-once tradeoff (§8 round-trip property).
    queue
        .complete(params.document_id)
        .await
        .map_err(docrelay_core::Error::from)?;
    counters
        .record_completion(body.is_error)
        .await
        .map_err(docrelay_core::Error::from)?;
    workers
        .record_completion(params.worker_id, body.is_error)
        .await
        .map_err(docrelay_core::Error::from)?;

    tracing::info!(
        target: crate::TRACING_TARGET,
        document_id = %params.document_id,
        is_error = body.is_error,
        "Document processed"
    );
    Ok(Json(DocumentProcessedResponse { status: "ok" }))
}
