use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::extract::extract_pdf_text;
use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::state::AppState;

pub const ANALYSIS_VERSION: &str = "1.0.0";

const FILE_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisMetadata {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub analysis_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl AnalysisMetadata {
    fn new(file_name: Option<String>) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            analysis_version: ANALYSIS_VERSION,
            file_name,
        }
    }
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub metadata: AnalysisMetadata,
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(req) = payload?;
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || engine.analyze(&req.text)).await??;
    Ok(Json(respond(result, None)))
}

/// POST /api/v1/resumes/analyze/pdf
/// Multipart upload; the PDF goes in the `file` field.
pub async fn handle_analyze_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut multipart = multipart?;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) = upload
        .ok_or_else(|| AppError::Validation(format!("Missing '{FILE_FIELD}' field")))?;
    info!(
        file_name = file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = data.len(),
        "Analyzing uploaded PDF"
    );

    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<AnalysisResult, AppError> {
        let text = extract_pdf_text(&data)?;
        Ok(engine.analyze(&text)?)
    })
    .await??;

    Ok(Json(respond(result, file_name)))
}

fn respond(result: AnalysisResult, file_name: Option<String>) -> AnalyzeResponse {
    info!(score = result.score, skills = result.total_skills_found, "Analysis complete");
    AnalyzeResponse {
        success: true,
        result,
        metadata: AnalysisMetadata::new(file_name),
    }
}
