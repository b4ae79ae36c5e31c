//! Content handlers, generic over the form kind.
//!
//! Admin submissions arrive as `multipart/form-data` using the form's wire
//! field names. Text parts fill the draft; file parts attach to it. Empty
//! file parts and unknown fields are skipped.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use outreach_core::content::{Draft, LocalFile};
use outreach_core::error::{CoreError, ValidationError};
use outreach_core::types::DbId;
use outreach_db::models::Record;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::session::AdminSession;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;
use crate::workflow::{FormKind, FormWorkflow, SubmitError, Target};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
pub struct SavedRecord {
    pub id: DbId,
}

/// POST /api/v1/admin/{collection}
pub async fn create<K: FormKind>(
    State(state): State<AppState>,
    _session: AdminSession,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<MessageResponse<SavedRecord>>)> {
    let response = submit::<K>(&state, multipart, Target::Create).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/v1/admin/{collection}/{id}
///
/// Files left out of the form keep their stored URLs.
pub async fn update<K: FormKind>(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<MessageResponse<SavedRecord>>> {
    let response = submit::<K>(&state, multipart, Target::Update(id)).await?;
    Ok(Json(response))
}

/// GET /api/v1/admin/{collection}/{id}
pub async fn find<K: FormKind>(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Record>>> {
    let record = state
        .store
        .find(K::COLLECTION, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: K::COLLECTION.label(),
            id,
        })?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/{collection}
///
/// Public "get all" for the display pages, newest first.
pub async fn list<K: FormKind>(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Record>>>> {
    let records = state.store.list(K::COLLECTION).await?;
    Ok(Json(DataResponse { data: records }))
}

async fn submit<K: FormKind>(
    state: &AppState,
    mut multipart: Multipart,
    target: Target,
) -> AppResult<MessageResponse<SavedRecord>> {
    let mut workflow = state.workflow::<K>();
    let mut refused = Map::new();

    if let Err(err) = fill_draft::<K>(&mut workflow, &mut multipart, &mut refused).await? {
        return Err(rejected(err.into(), &workflow, refused));
    }

    match workflow.submit(target).await {
        Ok(id) => Ok(MessageResponse {
            data: SavedRecord { id },
            message: K::success_message(target),
        }),
        Err(err) => Err(rejected(err, &workflow, Map::new())),
    }
}

/// Read every multipart part into the draft.
///
/// The outer error is a malformed request; the inner one a field value the
/// draft refused (e.g. an unknown `mediaType`), reported like any other
/// validation failure. Refused text values are collected as typed so the
/// echoed draft shows them instead of the field default.
async fn fill_draft<K: FormKind>(
    workflow: &mut FormWorkflow<K>,
    multipart: &mut Multipart,
    refused: &mut Map<String, Value>,
) -> AppResult<Result<(), ValidationError>> {
    let mut first_error = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let result = if K::Draft::FILE_FIELDS.contains(&name.as_str()) {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();
            let data = field.bytes().await.map_err(malformed)?;
            if data.is_empty() {
                continue;
            }
            workflow
                .draft_mut()
                .attach(&name, LocalFile::new(file_name, content_type, data.to_vec()))
        } else if K::Draft::TEXT_FIELDS.contains(&name.as_str()) {
            let value = field.text().await.map_err(malformed)?;
            let result = workflow.draft_mut().set_text(&name, value.clone());
            if result.is_err() {
                refused.insert(name.clone(), Value::String(value));
            }
            result
        } else {
            tracing::debug!(collection = %K::COLLECTION, field = %name, "Skipping unknown form field");
            continue;
        };

        if let Err(err) = result {
            first_error.get_or_insert(err);
        }
    }

    Ok(first_error.map_or(Ok(()), Err))
}

/// Body-limit overflows answer 413; anything else is a malformed request.
fn malformed(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

fn rejected<K: FormKind>(
    error: SubmitError,
    workflow: &FormWorkflow<K>,
    refused: Map<String, Value>,
) -> AppError {
    let mut draft = serde_json::to_value(workflow.draft()).unwrap_or_default();
    if let Some(fields) = draft.as_object_mut() {
        fields.extend(refused);
    }
    AppError::submit(error, draft)
}
