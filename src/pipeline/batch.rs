//! Batch orchestration: staged upload → text extraction → structuring.
//!
//! Files are processed strictly in order, one at a time. The first failure
//! aborts the whole batch and surfaces the offending filename; results
//! already produced are discarded, never partially returned.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::pipeline::structuring::{
    structure_text, GenerativeClient, StructuredOutput, StructuringError,
};
use crate::pipeline::textract::{extract_text, DocumentParseError};

/// One uploaded file, in arrival order.
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A structured document tagged with the filename it came from. The tag is
/// attached here, after extraction — it is not part of the model schema.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(flatten)]
    pub document: StructuredOutput,
}

#[derive(Error, Debug)]
#[error("Error while processing {file_name}: {source}")]
pub struct BatchError {
    pub file_name: String,
    #[source]
    pub source: BatchErrorKind,
}

#[derive(Error, Debug)]
pub enum BatchErrorKind {
    #[error(transparent)]
    Parse(#[from] DocumentParseError),

    #[error(transparent)]
    Structuring(#[from] StructuringError),

    #[error("staging failed: {0}")]
    Staging(#[from] std::io::Error),
}

/// Process an ordered batch of uploaded files into an ordered batch of
/// structured documents. All-or-nothing: the result is either every file's
/// document or the first error, tagged with its filename.
pub async fn process_batch<C>(
    files: Vec<UploadedFile>,
    client: &C,
    uploads_dir: &Path,
) -> Result<Vec<ProcessedDocument>, BatchError>
where
    C: GenerativeClient + ?Sized,
{
    let mut results = Vec::with_capacity(files.len());

    for file in files {
        let document = process_one(&file, client, uploads_dir)
            .await
            .map_err(|source| BatchError {
                file_name: file.file_name.clone(),
                source,
            })?;

        results.push(ProcessedDocument {
            file_name: file.file_name,
            document,
        });
    }

    Ok(results)
}

async fn process_one<C>(
    file: &UploadedFile,
    client: &C,
    uploads_dir: &Path,
) -> Result<StructuredOutput, BatchErrorKind>
where
    C: GenerativeClient + ?Sized,
{
    std::fs::create_dir_all(uploads_dir)?;

    // Staged names are timestamped and never trust the client-supplied
    // filename. The staged copy is dropped — and deleted — on every exit
    // path, success or failure.
    let mut staged = tempfile::Builder::new()
        .prefix(&format!("{}_", chrono::Utc::now().timestamp_millis()))
        .tempfile_in(uploads_dir)?;
    staged.write_all(&file.bytes)?;
    staged.flush()?;

    let raw_text = extract_text(staged.path())?;
    tracing::info!(file = %file.file_name, text_len = raw_text.len(), "text extracted");

    let document = structure_text(client, &raw_text).await?;
    tracing::info!(file = %file.file_name, "document structured");

    Ok(document)
}

/// Write the aggregate result artifact after a successful batch.
pub fn write_artifact(path: &Path, results: &[ProcessedDocument]) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(results).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Reset the artifact to an empty array, for privacy. Best-effort: failures
/// are logged, never raised.
pub fn wipe_artifact(path: &Path) {
    match std::fs::write(path, "[]") {
        Ok(()) => tracing::info!(path = %path.display(), "cleared output artifact"),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not clear output artifact")
        }
    }
}
