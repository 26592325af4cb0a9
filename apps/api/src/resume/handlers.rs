use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::resume::extractor::extract_resume_data;
use crate::resume::models::{ExtractionResult, ResumeData, StoredResume};
use crate::resume::pdf::{extract_pdf_text, is_pdf};
use crate::resume::prefill::prefill_resume;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub extraction: ExtractionResult,
    /// Stored resume with the extraction merged in. Not saved until the client PUTs it.
    pub draft: ResumeData,
    pub needs_review: bool,
}

/// POST /api/v1/resume/extract
pub async fn handle_extract(Json(req): Json<ExtractRequest>) -> Json<ExtractionResult> {
    let extraction = extract_resume_data(&req.raw_text);
    log_extraction(&extraction);
    Json(extraction)
}

/// POST /api/v1/resume/import
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::from_multipart(e, limit))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::from_multipart(e, limit))?;
            upload = Some(bytes);
            break;
        }
    }

    let bytes = upload.ok_or_else(|| {
        AppError::Validation(format!("Missing '{UPLOAD_FIELD}' field in upload"))
    })?;
    if !is_pdf(&bytes) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF".to_string(),
        ));
    }

    debug!(bytes = bytes.len(), "Extracting text from uploaded resume");
    let text = extract_pdf_text(bytes).await?;

    let extraction = extract_resume_data(&text);
    log_extraction(&extraction);

    let current = state.store.load().await?;
    let draft = prefill_resume(current.resume, &extraction);
    let needs_review = extraction.needs_review();

    Ok(Json(ImportResponse {
        extraction,
        draft,
        needs_review,
    }))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
) -> Result<Json<StoredResume>, AppError> {
    Ok(Json(state.store.load().await?))
}

/// PUT /api/v1/resume
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(resume): Json<ResumeData>,
) -> Result<Json<StoredResume>, AppError> {
    let stored = state.store.save(resume).await?;
    info!(
        experience = stored.resume.experience.len(),
        education = stored.resume.education.len(),
        "Resume saved"
    );
    Ok(Json(stored))
}

fn log_extraction(extraction: &ExtractionResult) {
    info!(
        experience = extraction.experience.len(),
        education = extraction.education.len(),
        needs_review = extraction.needs_review(),
        "Resume text extracted"
    );
}
