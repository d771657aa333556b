use storefront_api::error::AppError;
use storefront_api::services::upload_service::store_file;

#[tokio::test]
async fn upload_writes_file_and_returns_url_with_filename() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let upload_dir = dir.path().to_str().unwrap();

    let resp = store_file(upload_dir, "http://localhost:4000", "cat.png", b"pixels").await?;
    let url = resp.data.unwrap().url;
    assert!(url.contains("cat.png"));
    assert!(url.starts_with("http://localhost:4000/"));

    let written = tokio::fs::read(dir.path().join("cat.png")).await?;
    assert_eq!(written, b"pixels");
    Ok(())
}

#[tokio::test]
async fn upload_with_empty_filename_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().to_str().unwrap();

    let err = store_file(upload_dir, "http://localhost:4000", "", b"pixels")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

// No collision handling: uploading the same filename twice keeps the last body.
#[tokio::test]
async fn upload_name_collision_last_writer_wins() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let upload_dir = dir.path().to_str().unwrap();

    store_file(upload_dir, "http://localhost:4000", "cat.png", b"first").await?;
    store_file(upload_dir, "http://localhost:4000", "cat.png", b"second").await?;

    let written = tokio::fs::read(dir.path().join("cat.png")).await?;
    assert_eq!(written, b"second");
    Ok(())
}
