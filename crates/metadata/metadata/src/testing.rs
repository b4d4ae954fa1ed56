use stockroom_core::NewProduct;

use crate::error::MetadataError;
use crate::store::ProductStore;

/// Run the product store conformance test suite.
///
/// Call this from your backend's test module with a fresh, empty store.
///
/// # Errors
///
/// Returns an error if a store operation fails unexpectedly.
pub async fn run_product_store_conformance_tests(
    store: &dyn ProductStore,
) -> Result<(), MetadataError> {
    test_get_missing(store).await?;
    test_insert_assigns_ids(store).await?;
    test_scan_window(store).await?;
    test_delete(store).await?;
    Ok(())
}

async fn test_get_missing(store: &dyn ProductStore) -> Result<(), MetadataError> {
    assert!(
        store.get(i64::MAX).await?.is_none(),
        "get on missing id should return None"
    );
    assert!(
        !store.delete(i64::MAX).await?,
        "delete on missing id should return false"
    );
    Ok(())
}

async fn test_insert_assigns_ids(store: &dyn ProductStore) -> Result<(), MetadataError> {
    let first = store
        .insert(NewProduct::new("Chair", "memory://test/chair.png"))
        .await?;
    let second = store
        .insert(NewProduct::new("Table", "memory://test/table.png"))
        .await?;

    assert!(first.id > 0, "ids must be non-zero");
    assert!(second.id > first.id, "ids must increase");
    assert_eq!(first.name, "Chair");
    assert_eq!(first.photo_key, "memory://test/chair.png");
    assert!(first.updated_at >= first.created_at);

    let fetched = store.get(first.id).await?;
    assert_eq!(fetched.as_ref().map(|p| p.name.as_str()), Some("Chair"));
    Ok(())
}

async fn test_scan_window(store: &dyn ProductStore) -> Result<(), MetadataError> {
    let existing = store.scan(0, u64::from(u32::MAX)).await?.len() as u64;
    for i in 0..6 {
        store
            .insert(NewProduct::new(format!("scan-{i}"), format!("scan-{i}.png")))
            .await?;
    }

    let window = store.scan(existing + 2, 3).await?;
    let names: Vec<_> = window.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["scan-2", "scan-3", "scan-4"], "scan keeps id order");

    let past_end = store.scan(existing + 100, 10).await?;
    assert!(past_end.is_empty(), "scan past the end should be empty");
    Ok(())
}

async fn test_delete(store: &dyn ProductStore) -> Result<(), MetadataError> {
    let product = store
        .insert(NewProduct::new("Doomed", "doomed.png"))
        .await?;

    assert!(store.delete(product.id).await?, "first delete should succeed");
    assert!(store.get(product.id).await?.is_none());
    assert!(
        !store.delete(product.id).await?,
        "second delete should report absence"
    );
    Ok(())
}
