//! Recipe service integration tests: demo mode, caching and error
//! classification against in-test backends

mod helpers;

use chromamix::recipe::{
    demo_recipe, BackendError, RecipeBackend, RecipeError, RecipeErrorKind, RECIPE_CACHE_KEY,
};
use chromamix_common::storage::MemoryStore;
use chromamix_common::{KeyValueStore, Pigment};
use helpers::{recipe_service, CountingBackend, ORANGE_RECIPE};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_demo_mode_leaves_cache_untouched() {
    let store = Arc::new(MemoryStore::new());
    let service = recipe_service(None, store.clone());
    assert!(!service.has_credential());

    let recipe = service.get_mixing_recipe("#123456").await.unwrap();
    assert_eq!(recipe, demo_recipe());
    assert_eq!(recipe[1], Pigment::Yellow.step(2));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_demo_mode_applies_delay() {
    let store = Arc::new(MemoryStore::new());
    let service = chromamix::recipe::RecipeService::new(None, store)
        .with_demo_delay(Duration::from_millis(50));

    let started = Instant::now();
    service.get_raw_recipe("#123456").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let backend = CountingBackend::ok(ORANGE_RECIPE);
    let store = Arc::new(MemoryStore::new());
    let service = recipe_service(Some(backend.clone() as Arc<dyn RecipeBackend>), store.clone());

    let first = service.get_mixing_recipe("#FF8000").await.unwrap();
    let second = service.get_mixing_recipe("#FF8000").await.unwrap();

    assert_eq!(backend.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(first[0].color_name, "Yellow");
    assert_eq!(first[0].parts, 2);

    let raw = store.get(RECIPE_CACHE_KEY).await.unwrap().unwrap();
    let entries: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(entries["#FF8000"], ORANGE_RECIPE);
}

#[tokio::test]
async fn test_cache_key_is_not_normalized() {
    let backend = CountingBackend::ok(ORANGE_RECIPE);
    let service = recipe_service(
        Some(backend.clone() as Arc<dyn RecipeBackend>),
        Arc::new(MemoryStore::new()),
    );

    service.get_raw_recipe("#ff8000").await.unwrap();
    service.get_raw_recipe("#FF8000").await.unwrap();
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_cached_entry_used_without_backend_call() {
    let backend = CountingBackend::ok(ORANGE_RECIPE);
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            RECIPE_CACHE_KEY,
            r##"{"#00FFFF":"[{\"colorName\":\"Blue\",\"colorHex\":\"#0000FF\",\"parts\":1}]"}"##,
        )
        .await
        .unwrap();
    let service = recipe_service(Some(backend.clone() as Arc<dyn RecipeBackend>), store);

    let recipe = service.get_mixing_recipe("#00FFFF").await.unwrap();
    assert_eq!(recipe, vec![Pigment::Blue.step(1)]);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_permission_denied_is_invalid_credential() {
    let backend = CountingBackend::failing(BackendError::Api {
        status: 403,
        message: "PERMISSION_DENIED: Method doesn't allow unregistered callers".to_string(),
    });
    let store = Arc::new(MemoryStore::new());
    let service = recipe_service(Some(backend.clone() as Arc<dyn RecipeBackend>), store.clone());

    let err = service.get_mixing_recipe("#FF8000").await.unwrap_err();
    assert_eq!(err, RecipeError::InvalidCredential);
    assert_eq!(backend.calls(), 1);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_other_backend_failures_are_generation_failed() {
    let backend = CountingBackend::failing(BackendError::Api {
        status: 500,
        message: "INTERNAL: try again later".to_string(),
    });
    let service = recipe_service(
        Some(backend.clone() as Arc<dyn RecipeBackend>),
        Arc::new(MemoryStore::new()),
    );

    let err = service.get_mixing_recipe("#FF8000").await.unwrap_err();
    assert_eq!(err.kind(), RecipeErrorKind::GenerationFailed);

    // no retry
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_malformed_payload_is_response_parse() {
    let backend = CountingBackend::ok(r#"{"recipe": "two parts sunshine"}"#);
    let service = recipe_service(
        Some(backend.clone() as Arc<dyn RecipeBackend>),
        Arc::new(MemoryStore::new()),
    );

    let err = service.get_mixing_recipe("#FF8000").await.unwrap_err();
    assert_eq!(err.kind(), RecipeErrorKind::ResponseParse);
}
