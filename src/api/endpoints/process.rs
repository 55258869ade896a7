//! Document processing endpoint — multipart batch upload.
//!
//! `POST /process` — receives an ordered collection of files, runs each
//! through text extraction and structuring, and returns the ordered array
//! of structured documents. A failure on any file fails the whole request.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::pipeline::batch::{
    process_batch, write_artifact, wipe_artifact, ProcessedDocument, UploadedFile,
};

/// Multipart field name carrying the uploaded documents.
const FILES_FIELD: &str = "files";

pub async fn handle(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<Vec<ProcessedDocument>>, ApiError> {
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable multipart body: {e}")))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("document").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read '{file_name}': {e}")))?;

        files.push(UploadedFile {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(ApiError::BadRequest("no files in upload".into()));
    }

    let count = files.len();
    let results = process_batch(files, ctx.client.as_ref(), &ctx.config.uploads_dir).await?;

    if let Err(e) = write_artifact(&ctx.config.output_path, &results) {
        tracing::warn!(error = %e, "could not write output artifact");
    }

    // Privacy cleanup, decoupled from the response path: the artifact is
    // wiped by a detached task once the response is on its way out.
    let output_path = ctx.config.output_path.clone();
    tokio::spawn(async move { wipe_artifact(&output_path) });

    tracing::info!(files = count, "batch processed");
    Ok(Json(results))
}
