//! Axum route handlers for the Wizard API and the session pages.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{content_disposition, export_basename, Artifact};
use crate::models::field_path::FieldPath;
use crate::models::patch::ProfileEdit;
use crate::prefill::resolve_initial_patch;
use crate::render::pages::render_session_page;
use crate::render::render_document;
use crate::state::AppState;
use crate::wizard::enhance::EnhanceTarget;
use crate::wizard::flow;
use crate::wizard::session::{PreviewTab, SessionSnapshot, WizardSession};
use crate::wizard::store::SharedSession;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct StartQuery {
    pub uid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSessionRequest {
    pub uid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FieldEditRequest {
    pub path: String,
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PreviewRequest {
    pub tab: Option<PreviewTab>,
    pub edit_mode: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    /// False when the result arrived after the target was edited and was dropped.
    pub merged: bool,
    pub session: SessionSnapshot,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// Creates a session, prefilled from the candidate record when `uid` is given.
async fn open_session(state: &AppState, uid: Option<&str>) -> (Uuid, SharedSession) {
    let initial_patch = resolve_initial_patch(state.prefill.as_ref(), uid).await;
    let (id, session) = state.sessions.insert(WizardSession::new(initial_patch)).await;
    info!("Opened wizard session {id}");
    (id, session)
}

async fn snapshot_of(session: &SharedSession) -> Json<SessionSnapshot> {
    Json(session.lock().await.snapshot())
}

async fn run_enhancement(
    state: &AppState,
    id: Uuid,
    target: EnhanceTarget,
) -> Result<Json<EnhanceResponse>, AppError> {
    let session = find_session(state, id).await?;
    let merged = flow::enhance(&session, state.enhancer.as_ref(), target).await?;
    let snapshot = session.lock().await.snapshot();
    Ok(Json(EnhanceResponse {
        merged,
        session: snapshot,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Pages
// ────────────────────────────────────────────────────────────────────────────

/// GET /?uid=<candidate id>
///
/// Opens a new session and redirects to its page.
pub async fn handle_start(
    State(state): State<AppState>,
    Query(query): Query<StartQuery>,
) -> Redirect {
    let (id, _) = open_session(&state, query.uid.as_deref()).await;
    Redirect::to(&format!("/sessions/{id}"))
}

/// GET /sessions/:id
pub async fn handle_session_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = find_session(&state, id).await?;
    let page = render_session_page(&*session.lock().await);
    Ok(Html(page))
}

/// GET /sessions/:id/export/:artifact
///
/// Renders the résumé (`cv`) or cover letter (`letter`) without any editing
/// controls and returns it as a download.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, artifact)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let artifact = Artifact::parse(&artifact)
        .ok_or_else(|| AppError::NotFound(format!("Unknown export artifact '{artifact}'")))?;
    let session = find_session(&state, id).await?;
    let profile = session.lock().await.profile().clone();

    let document = render_document(&profile, artifact);
    let basename = export_basename(&profile.full_name, artifact);
    let file = state.exporter.export(&document, &basename).await?;
    info!("Session {id} exported {}", file.filename);

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file.filename)),
        ],
        file.bytes,
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Session API
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let (_, session) = open_session(&state, request.uid.as_deref()).await;
    (StatusCode::CREATED, snapshot_of(&session).await)
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    Ok(snapshot_of(&session).await)
}

/// POST /api/v1/sessions/:id/advance
///
/// From step3 this waits for the cover letter and the analysis before
/// answering. A second advance while they run is rejected with 409.
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    flow::advance(&session, state.enhancer.as_ref()).await?;
    Ok(snapshot_of(&session).await)
}

/// POST /api/v1/sessions/:id/retreat
pub async fn handle_retreat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    let mut guard = session.lock().await;
    guard.retreat()?;
    Ok(Json(guard.snapshot()))
}

/// POST /api/v1/sessions/:id/quick-test
pub async fn handle_quick_test(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    let mut guard = session.lock().await;
    guard.quick_test()?;
    Ok(Json(guard.snapshot()))
}

/// PATCH /api/v1/sessions/:id/profile
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<ProfileEdit>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    let mut guard = session.lock().await;
    guard.apply(edit)?;
    Ok(Json(guard.snapshot()))
}

/// POST /api/v1/sessions/:id/fields
///
/// Writes one rendered slot, addressed by its `data-path`.
pub async fn handle_edit_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FieldEditRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let edit = FieldPath::parse(&request.path)?.into_edit(request.value)?;
    let session = find_session(&state, id).await?;
    let mut guard = session.lock().await;
    guard.apply(edit)?;
    Ok(Json(guard.snapshot()))
}

/// POST /api/v1/sessions/:id/preview
pub async fn handle_set_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    let mut guard = session.lock().await;
    guard.set_preview(request.tab, request.edit_mode);
    Ok(Json(guard.snapshot()))
}

/// POST /api/v1/sessions/:id/enhance/summary
pub async fn handle_enhance_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnhanceResponse>, AppError> {
    run_enhancement(&state, id, EnhanceTarget::Summary).await
}

/// POST /api/v1/sessions/:id/enhance/skills
pub async fn handle_enhance_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnhanceResponse>, AppError> {
    run_enhancement(&state, id, EnhanceTarget::Skills).await
}

/// POST /api/v1/sessions/:id/enhance/experiences/:exp_id
pub async fn handle_enhance_experience(
    State(state): State<AppState>,
    Path((id, exp_id)): Path<(Uuid, String)>,
) -> Result<Json<EnhanceResponse>, AppError> {
    run_enhancement(&state, id, EnhanceTarget::experience(&exp_id)).await
}
