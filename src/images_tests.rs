//! Tests for image URL derivation, the on-disk cache and HTTP fetching.

use super::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_cache() -> (ImageCache, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let cache = ImageCache {
        cache_dir: temp_dir.path().to_path_buf(),
    };
    (cache, temp_dir)
}

// ── URL derivation ───────────────────────────────────────────────────

#[test]
fn test_image_url_is_base_plus_id_plus_extension() {
    assert_eq!(
        card_image_url("a2"),
        "https://images.thepitchzone.com/cards/a2.png"
    );
}

#[test]
fn test_image_url_preserves_id_verbatim() {
    assert_eq!(card_image_url("WTR001"), format!("{}WTR001.png", IMAGE_BASE_URL));
}

// ── cache ────────────────────────────────────────────────────────────

#[test]
fn test_filename_format() {
    assert_eq!(ImageCache::filename("a2"), "a2.png");
    assert_eq!(ImageCache::filename("WTR001"), "wtr001.png");
}

#[test]
fn test_get_nonexistent_returns_none() {
    let (cache, _temp_dir) = create_test_cache();
    assert!(cache.get("a2").is_none());
    assert!(!cache.contains("a2"));
}

#[test]
fn test_insert_and_get() {
    let (cache, _temp_dir) = create_test_cache();
    let test_data = vec![0x89, 0x50, 0x4E, 0x47]; // PNG magic bytes

    cache.insert("a2", &test_data);

    assert!(cache.contains("a2"));
    assert_eq!(cache.get("a2").unwrap(), test_data);
}

#[test]
fn test_get_case_insensitive_card_id() {
    let (cache, _temp_dir) = create_test_cache();
    cache.insert("WTR001", &[1, 2, 3]);

    // Key is lowercased on both paths
    assert!(cache.get("wtr001").is_some());
    assert!(cache.get("WTR001").is_some());
}

#[test]
fn test_insert_overwrites_existing() {
    let (cache, _temp_dir) = create_test_cache();
    cache.insert("a2", &[1, 2, 3]);
    cache.insert("a2", &[4, 5, 6, 7]);

    assert_eq!(cache.get("a2").unwrap(), vec![4, 5, 6, 7]);
}

#[test]
fn test_files_persist_across_cache_instances() {
    let temp_dir = TempDir::new().unwrap();
    let cache_dir = temp_dir.path().to_path_buf();

    {
        let cache = ImageCache {
            cache_dir: cache_dir.clone(),
        };
        cache.insert("a2", &[10, 20, 30]);
    }

    {
        let cache = ImageCache { cache_dir };
        assert_eq!(cache.get("a2").unwrap(), vec![10, 20, 30]);
    }
}

// ── fetching ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_image_returns_bytes_on_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/a2.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
        .mount(&mock_server)
        .await;

    let url = format!("{}/cards/a2.png", mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch_image(&url))
        .await
        .unwrap();

    assert_eq!(result.unwrap(), vec![0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn test_fetch_image_surfaces_http_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/cards/missing.png", mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch_image(&url))
        .await
        .unwrap();

    match result {
        Err(SheetError::HttpStatus(status)) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected HttpStatus error, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_fetch_image_cached_serves_from_cache_without_network() {
    let (cache, _temp_dir) = create_test_cache();
    cache.insert("a2", &[7, 7, 7]);

    // No server is running; a cache hit must not touch the network
    let bytes = fetch_image_cached(&cache, "a2").unwrap();
    assert_eq!(bytes, vec![7, 7, 7]);
}
