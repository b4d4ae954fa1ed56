use bytes::Bytes;

use crate::error::BlobError;
use crate::store::BlobStore;

/// Run the blob store conformance test suite.
///
/// Call this from your backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if a store operation fails unexpectedly.
pub async fn run_blob_conformance_tests(store: &dyn BlobStore) -> Result<(), BlobError> {
    test_get_missing(store).await?;
    test_put_and_get(store).await?;
    test_overwrite(store).await?;
    test_delete(store).await?;
    test_delete_missing(store).await?;
    test_durable_url(store);
    Ok(())
}

async fn test_get_missing(store: &dyn BlobStore) -> Result<(), BlobError> {
    match store.get("conformance-missing.bin").await {
        Err(BlobError::NotFound(_)) => Ok(()),
        Err(e) => Err(e),
        Ok(_) => panic!("get on missing key should return NotFound"),
    }
}

async fn test_put_and_get(store: &dyn BlobStore) -> Result<(), BlobError> {
    let data = Bytes::from_static(b"\x89PNG\r\n\x1a\nconformance");
    store
        .put("conformance-put.png", "image/png", data.clone())
        .await?;

    let object = store.get("conformance-put.png").await?;
    assert_eq!(object.content_type, "image/png");
    assert_eq!(object.content_length, data.len() as u64);
    assert_eq!(object.collect().await?, data);
    Ok(())
}

async fn test_overwrite(store: &dyn BlobStore) -> Result<(), BlobError> {
    store
        .put("conformance-dup.txt", "text/plain", Bytes::from_static(b"first"))
        .await?;
    store
        .put("conformance-dup.txt", "text/plain", Bytes::from_static(b"second"))
        .await?;

    let data = store.get("conformance-dup.txt").await?.collect().await?;
    assert_eq!(&data[..], b"second", "last write should win");
    Ok(())
}

async fn test_delete(store: &dyn BlobStore) -> Result<(), BlobError> {
    store
        .put("conformance-del.txt", "text/plain", Bytes::from_static(b"bye"))
        .await?;
    store.delete("conformance-del.txt").await?;

    let result = store.get("conformance-del.txt").await;
    assert!(
        matches!(result, Err(BlobError::NotFound(_))),
        "get after delete should return NotFound"
    );
    Ok(())
}

async fn test_delete_missing(store: &dyn BlobStore) -> Result<(), BlobError> {
    store.delete("conformance-never-written.txt").await
}

fn test_durable_url(store: &dyn BlobStore) {
    let url = store.durable_url("chair.png");
    assert!(url.ends_with("/chair.png"));
    assert!(url.starts_with(store.base_url().trim_end_matches('/')));
    assert!(!url.contains("//chair.png"));
}
