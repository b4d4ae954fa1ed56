use std::time::Duration;

use crate::error::CacheError;
use crate::index::CacheIndex;

const TTL: Duration = Duration::from_secs(60);

/// Run the cache index conformance test suite.
///
/// Expiry is not covered here because it depends on each backend's clock;
/// backends test it on their own.
///
/// # Errors
///
/// Returns an error if a cache operation fails unexpectedly.
pub async fn run_cache_conformance_tests(cache: &dyn CacheIndex) -> Result<(), CacheError> {
    test_get_missing(cache).await?;
    test_set_and_get(cache).await?;
    test_overwrite(cache).await?;
    test_reads_do_not_consume(cache).await?;
    Ok(())
}

async fn test_get_missing(cache: &dyn CacheIndex) -> Result<(), CacheError> {
    let val = cache.get("conformance-missing").await?;
    assert!(val.is_none(), "get on missing key should return None");
    Ok(())
}

async fn test_set_and_get(cache: &dyn CacheIndex) -> Result<(), CacheError> {
    cache.set("conformance-1", "chair.png", TTL).await?;
    let val = cache.get("conformance-1").await?;
    assert_eq!(val.as_deref(), Some("chair.png"));
    Ok(())
}

async fn test_overwrite(cache: &dyn CacheIndex) -> Result<(), CacheError> {
    cache.set("conformance-2", "first.png", TTL).await?;
    cache.set("conformance-2", "second.png", TTL).await?;
    let val = cache.get("conformance-2").await?;
    assert_eq!(val.as_deref(), Some("second.png"), "last write should win");
    Ok(())
}

async fn test_reads_do_not_consume(cache: &dyn CacheIndex) -> Result<(), CacheError> {
    cache.set("conformance-3", "lamp.png", TTL).await?;
    let first = cache.get("conformance-3").await?;
    let second = cache.get("conformance-3").await?;
    assert_eq!(first, second, "repeated reads should return the same value");
    Ok(())
}
