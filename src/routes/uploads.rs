use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};

use crate::{
    config::UPLOAD_DIR,
    dto::uploads::UploadResponse,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::upload_service::store_file,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/uploadimage", post(upload_image))
}

#[utoipa::path(
    post,
    path = "/uploadimage",
    responses(
        (status = 201, description = "Upload image", body = ApiResponse<UploadResponse>),
        (status = 400, description = "No file part or no selected file"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    _user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadResponse>>)> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?;
            file = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = match file {
        Some(f) => f,
        None => return Err(AppError::BadRequest("No file part".to_string())),
    };

    let resp = store_file(UPLOAD_DIR, &state.config.public_url, &filename, &bytes).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
