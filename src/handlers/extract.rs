use axum::{
    extract::{Multipart, State},
    response::Json,
};
use std::time::Instant;
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult};
use crate::models::{ExtractResponse, UploadedFile};
use crate::services::ExtractionEngine;
use crate::state::AppState;

pub async fn extract_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ExtractResponse>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

    info!(request_id = %request_id, "Starting PDF extraction request");

    let file = match extract_file_from_multipart(&mut multipart).await {
        Ok(file) => {
            info!(
                request_id = %request_id,
                file_name = %file.name,
                file_size = file.size,
                "File extracted from multipart form"
            );
            file
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Failed to extract file from multipart");
            return Err(e);
        }
    };

    if file.size > state.config.max_file_size_bytes() {
        return Err(AppError::FileTooLarge {
            size: file.size / (1024 * 1024),
            limit: state.config.max_file_size_mb,
        });
    }

    // The engine is synchronous and CPU-bound; run it off the async worker
    // threads. A panic inside a parsing library lands here as a join error
    // instead of taking the connection down.
    let UploadedFile { name, content, .. } = file;
    let outcome =
        match tokio::task::spawn_blocking(move || ExtractionEngine::new().extract(&content)).await
        {
            Ok(Ok(outcome)) => {
                info!(
                    request_id = %request_id,
                    text_length = outcome.text.len(),
                    pages = outcome.pages,
                    processing_time_ms = outcome.processing_time_ms,
                    "PDF processing completed successfully"
                );
                outcome
            }
            Ok(Err(e)) => {
                error!(request_id = %request_id, error = %e, "PDF processing failed");
                return Err(e);
            }
            Err(join_err) => {
                error!(
                    request_id = %request_id,
                    error = %join_err,
                    "Extraction task panicked or was cancelled"
                );
                return Err(AppError::processing(format!(
                    "extraction task failed: {}",
                    join_err
                )));
            }
        };

    let total_time = start.elapsed().as_millis() as u64;

    info!(
        request_id = %request_id,
        total_time_ms = total_time,
        "Request completed successfully"
    );

    Ok(Json(ExtractResponse::new(name, outcome.text)))
}

async fn extract_file_from_multipart(multipart: &mut Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::invalid_file(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or("");

        if field_name == "file" {
            let file_name = field.file_name().unwrap_or("unknown.pdf").to_string();

            let content_type = field.content_type().map(|ct| ct.to_string());

            let data = field.bytes().await.map_err(|e| {
                AppError::invalid_file(format!("Failed to read file data: {}", e))
            })?;

            if data.is_empty() {
                return Err(AppError::invalid_file("File is empty"));
            }

            let mut file = UploadedFile::new(file_name, data.to_vec());

            if let Some(mime_type) = content_type {
                file = file.with_mime_type(mime_type);
            }

            if !file.is_pdf() {
                return Err(AppError::invalid_file("Only PDF documents are supported"));
            }

            debug!(
                "Extracted file: {} ({} bytes, type: {:?})",
                file.name, file.size, file.mime_type
            );

            return Ok(file);
        }
    }

    Err(AppError::MissingFile)
}
