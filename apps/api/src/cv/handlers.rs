use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cv::store::parse_record;
use crate::errors::AppError;
use crate::render;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CvTextResponse {
    pub yaml: String,
}

#[derive(Deserialize)]
pub struct SaveRequest {
    pub yaml: String,
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    /// Document text to render; the stored document is used when absent.
    #[serde(default)]
    pub yaml: Option<String>,
}

/// GET /api/v1/cv
pub async fn handle_get_cv(
    State(state): State<AppState>,
) -> Result<Json<CvTextResponse>, AppError> {
    let yaml = state.store.load_raw().await?;
    Ok(Json(CvTextResponse { yaml }))
}

/// PUT /api/v1/cv
///
/// Validates structural well-formedness before persisting — malformed input
/// is rejected with 400 and nothing reaches the disk.
pub async fn handle_save_cv(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    parse_record(&req.yaml)?;
    state.store.save_raw(&req.yaml).await?;
    info!("CV document saved ({} bytes)", req.yaml.len());
    Ok(Json(SaveResponse { ok: true }))
}

/// POST /api/v1/cv/validate
///
/// Parse-only: always 200, with the parser message on failure. Nothing is
/// persisted either way.
pub async fn handle_validate(Json(req): Json<SaveRequest>) -> Json<ValidateResponse> {
    match parse_record(&req.yaml) {
        Ok(_) => Json(ValidateResponse {
            valid: true,
            error: None,
        }),
        Err(e) => Json(ValidateResponse {
            valid: false,
            error: Some(e.to_string()),
        }),
    }
}

/// POST /api/v1/cv/export
///
/// Renders the submitted document (or the stored one when the body is
/// absent) and streams the PDF back as an attachment. A renderer fault is a
/// failed export — no partial PDF is ever returned.
pub async fn handle_export(
    State(state): State<AppState>,
    body: Option<Json<ExportRequest>>,
) -> Result<Response, AppError> {
    let text = match body.and_then(|Json(req)| req.yaml) {
        Some(yaml) => yaml,
        None => state.store.load_raw().await?,
    };
    let record = parse_record(&text)?;

    let base_dir = state.store.base_dir();
    let assets_dir = state.config.assets_dir.clone();
    let geom = state.geometry.clone();

    // Photo decode + layout + serialization are CPU-bound; run them on the
    // blocking pool so the async executor stays responsive.
    let (pdf, filename) = tokio::task::spawn_blocking(move || {
        let photo = render::photo::resolve_photo(
            record.header.photo.as_deref(),
            &base_dir,
            &assets_dir,
        );
        let pdf = render::render_cv(&record, photo.as_ref(), &geom)?;
        Ok::<_, anyhow::Error>((pdf, record.meta.output_filename))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))?
    .map_err(|e| AppError::Render(e.to_string()))?;

    info!(bytes = pdf.len(), %filename, "PDF export rendered");

    let disposition = format!("attachment; filename=\"{}\"", sanitize_filename(&filename));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}

/// Strips characters that would break the Content-Disposition header; an
/// empty result falls back to the default filename.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '"' | '\\' | '/' | '\r' | '\n'))
        .collect();
    let cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() {
        "cv.pdf".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_filename_unchanged() {
        assert_eq!(sanitize_filename("jane_doe_cv.pdf"), "jane_doe_cv.pdf");
    }

    #[test]
    fn test_sanitize_strips_header_breakers() {
        assert_eq!(sanitize_filename("a\"b\\c/d\r\n.pdf"), "abcd.pdf");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename("  "), "cv.pdf");
        assert_eq!(sanitize_filename("\"\""), "cv.pdf");
    }

    #[test]
    fn test_validate_response_omits_error_when_valid() {
        let json = serde_json::to_string(&ValidateResponse {
            valid: true,
            error: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"valid":true}"#);
    }

    #[test]
    fn test_validate_response_carries_error_when_invalid() {
        let json = serde_json::to_string(&ValidateResponse {
            valid: false,
            error: Some("bad".to_string()),
        })
        .unwrap();
        assert!(json.contains("\"error\":\"bad\""));
    }
}
