use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
};
use shared::Menu;
use shared::client::{HealthResponse, UploadResponse};

use crate::state::{MockState, StoredImage};

/// Mock menu API routes
pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/api/menu", get(get_menu).put(put_menu))
        .route("/api/upload", post(upload))
        .route("/health", get(health))
        .with_state(state)
}

async fn get_menu(State(state): State<MockState>) -> Result<Json<Menu>, (StatusCode, String)> {
    state.take_menu_fetch().await.map(Json).map_err(|status| {
        tracing::debug!(%status, "Injected menu fetch failure");
        (status, format!("menu unavailable ({})", status))
    })
}

async fn put_menu(
    State(state): State<MockState>,
    Json(menu): Json<Menu>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let dishes = menu.len();
    state
        .replace_menu(menu)
        .await
        .map_err(|status| (status, "menu write rejected".to_string()))?;
    tracing::debug!(dishes, "Menu replaced");
    Ok(Json(serde_json::json!({ "success": true })))
}

async fn upload(
    State(state): State<MockState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    state
        .record_upload()
        .await
        .map_err(|status| (status, "upload rejected".to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        let index = state
            .store_image(StoredImage {
                file_name: file_name.clone(),
                content_type,
                size: data.len(),
            })
            .await;
        return Ok(Json(UploadResponse {
            image_url: format!("/uploads/{}-{}", index, file_name),
        }));
    }

    Err((StatusCode::BAD_REQUEST, "missing 'image' field".to_string()))
}

async fn health(
    State(state): State<MockState>,
) -> Result<Json<HealthResponse>, (StatusCode, String)> {
    state
        .check_health()
        .await
        .map_err(|status| (status, "unhealthy".to_string()))?;
    Ok(Json(HealthResponse {
        status: Some("ok".to_string()),
    }))
}
