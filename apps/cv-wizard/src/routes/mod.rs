pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::wizard::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(handlers::handle_start))
        .route("/sessions/:id", get(handlers::handle_session_page))
        .route(
            "/sessions/:id/export/:artifact",
            get(handlers::handle_export),
        )
        // Wizard API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", get(handlers::handle_get_session))
        .route(
            "/api/v1/sessions/:id/advance",
            post(handlers::handle_advance),
        )
        .route(
            "/api/v1/sessions/:id/retreat",
            post(handlers::handle_retreat),
        )
        .route(
            "/api/v1/sessions/:id/quick-test",
            post(handlers::handle_quick_test),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            patch(handlers::handle_apply_edit),
        )
        .route(
            "/api/v1/sessions/:id/fields",
            post(handlers::handle_edit_field),
        )
        .route(
            "/api/v1/sessions/:id/preview",
            post(handlers::handle_set_preview),
        )
        .route(
            "/api/v1/sessions/:id/enhance/summary",
            post(handlers::handle_enhance_summary),
        )
        .route(
            "/api/v1/sessions/:id/enhance/skills",
            post(handlers::handle_enhance_skills),
        )
        .route(
            "/api/v1/sessions/:id/enhance/experiences/:exp_id",
            post(handlers::handle_enhance_experience),
        )
        .with_state(state)
}
