use std::path::Path;
use tokio::fs;

use crate::{
    dto::uploads::UploadResponse,
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
};

/// Write an uploaded file into `upload_dir` under its original filename and
/// return the public URL. No collision handling: last writer wins on a
/// filename collision.
pub async fn store_file(
    upload_dir: &str,
    public_url: &str,
    filename: &str,
    bytes: &[u8],
) -> AppResult<ApiResponse<UploadResponse>> {
    if filename.is_empty() {
        return Err(AppError::BadRequest("No selected file".to_string()));
    }

    fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create upload dir: {e}")))?;

    let path = Path::new(upload_dir).join(filename);
    fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to save file: {e}")))?;

    let url = format!("{public_url}/{upload_dir}/{filename}");

    tracing::info!(file = %filename, size = bytes.len(), "image uploaded");

    Ok(ApiResponse::success(
        "Image uploaded successfully",
        UploadResponse { url },
        Some(Meta::empty()),
    ))
}
