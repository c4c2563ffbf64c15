use axum::{
    extract::Extension,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::Lead;
use crate::domains::audit::leads::{export_csv, list_message, CSV_FILENAME};
use crate::domains::audit::LeadsError;
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct LeadsResponse {
    pub leads: Vec<Lead>,
    pub count: usize,
    pub message: String,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub format: String,
}

/// Bearer-token gate for the admin routes. Runs before any backend is
/// touched; an unset server secret rejects everything.
fn authorize(headers: &HeaderMap, expected: Option<&str>) -> Result<(), LeadsError> {
    let Some(expected) = expected else {
        return Err(LeadsError::Unauthorized);
    };

    let supplied = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match supplied {
        Some(value) if value == format!("Bearer {}", expected) => Ok(()),
        _ => Err(LeadsError::Unauthorized),
    }
}

/// `GET /api/leads` - list leads from the first answering backend,
/// newest first.
pub async fn list_leads_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<LeadsResponse>, LeadsError> {
    authorize(&headers, state.leads_api_key.as_deref())?;

    let leads = state.deps.leads.list_leads().await;
    let count = leads.len();

    Ok(Json(LeadsResponse {
        leads,
        count,
        message: list_message(count),
    }))
}

/// `POST /api/leads` - export leads. Only `{"format": "csv"}` is supported.
pub async fn export_leads_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(request): Json<ExportRequest>,
) -> Result<Response, LeadsError> {
    authorize(&headers, state.leads_api_key.as_deref())?;

    if request.format != "csv" {
        return Err(LeadsError::BadFormat);
    }

    let leads = state.deps.leads.list_leads().await;
    let csv = export_csv(&leads)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ),
        ],
        csv,
    )
        .into_response())
}
