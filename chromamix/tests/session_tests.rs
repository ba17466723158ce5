//! Session integration tests: stale recipe suppression, error surfacing and
//! persistence across sessions

mod helpers;

use chromamix::recipe::{BackendError, RecipeBackend, RecipeErrorKind, RecipeService};
use chromamix::session::{RecipeOutcome, Session, PALETTE_KEY};
use chromamix_common::palette::wheel;
use chromamix_common::storage::SqliteStore;
use chromamix_common::{Color, KeyValueStore};
use helpers::{session_with, CountingBackend, GatedBackend, ORANGE_RECIPE};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_recipe_for_old_selection_is_discarded() {
    let backend = GatedBackend::new(ORANGE_RECIPE);
    let (session, _) = session_with(Some(backend.clone() as Arc<dyn RecipeBackend>));

    let orange = wheel()[1].clone();
    let cyan = wheel()[6].clone();
    session.select_color(orange).await;

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.request_recipe().await })
    };

    backend.entered.notified().await;
    assert!(session.is_loading().await);

    session.select_color(cyan.clone()).await;
    assert!(!session.is_loading().await);

    backend.release.notify_one();
    let outcome = pending.await.unwrap().unwrap();

    assert_eq!(outcome, RecipeOutcome::Discarded);
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.selected, Some(cyan));
    assert_eq!(snapshot.recipe, None);
    assert_eq!(snapshot.error, None);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_clear_selection_discards_pending_recipe() {
    let backend = GatedBackend::new(ORANGE_RECIPE);
    let (session, _) = session_with(Some(backend.clone() as Arc<dyn RecipeBackend>));
    session.select_color(wheel()[1].clone()).await;

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.request_recipe().await })
    };
    backend.entered.notified().await;

    session.clear_selection().await;
    backend.release.notify_one();

    assert_eq!(pending.await.unwrap(), Ok(RecipeOutcome::Discarded));
    assert!(session.selected().await.is_none());
    assert!(session.recipe().await.is_none());
}

#[tokio::test]
async fn test_current_request_is_applied() {
    let backend = GatedBackend::new(ORANGE_RECIPE);
    let (session, _) = session_with(Some(backend.clone() as Arc<dyn RecipeBackend>));
    session.select_color(wheel()[1].clone()).await;

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.request_recipe().await })
    };
    backend.entered.notified().await;
    backend.release.notify_one();

    assert_eq!(pending.await.unwrap(), Ok(RecipeOutcome::Applied));
    let recipe = session.recipe().await.unwrap();
    assert_eq!(recipe.len(), 2);
    assert!(!session.is_loading().await);
}

#[tokio::test]
async fn test_failure_sets_classified_error() {
    let backend = CountingBackend::failing(BackendError::Api {
        status: 400,
        message: "INVALID_ARGUMENT: API key not valid. Please pass a valid API key.".to_string(),
    });
    let (session, _) = session_with(Some(backend as Arc<dyn RecipeBackend>));
    session.select_color(wheel()[4].clone()).await;

    let outcome = session.request_recipe().await.unwrap();
    assert!(matches!(outcome, RecipeOutcome::Failed(_)));

    let error = session.error().await.unwrap();
    assert_eq!(error.kind, RecipeErrorKind::InvalidCredential);
    assert!(error.message.contains("API key"));
    assert!(session.recipe().await.is_none());
    assert!(!session.is_loading().await);

    // reselecting clears the error
    session.select_color(wheel()[4].clone()).await;
    assert!(session.error().await.is_none());
}

#[tokio::test]
async fn test_demo_recipe_in_session() {
    let (session, store) = session_with(None);
    session.select_color(wheel()[0].clone()).await;

    assert_eq!(session.request_recipe().await, Ok(RecipeOutcome::Applied));
    assert_eq!(session.recipe().await.unwrap().len(), 3);
    // demo mode writes nothing
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_palette_survives_restart_on_sqlite() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("chromamix.db");

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db_path).await.unwrap());
        let recipes = Arc::new(RecipeService::new(None, store.clone()));
        let session = Session::load(recipes, store).await;

        session.add_to_palette(wheel()[8].clone()).await;
        session.add_to_palette(wheel()[8].clone()).await;
        session
            .add_to_palette(Color::new("Sand", "c2b280", 0).unwrap())
            .await;
        assert_eq!(session.palette().await.len(), 2);
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db_path).await.unwrap());
    let raw = store.get(PALETTE_KEY).await.unwrap().unwrap();
    assert!(raw.contains("#C2B280"));

    let recipes = Arc::new(RecipeService::new(None, store.clone()));
    let session = Session::load(recipes, store).await;
    let palette = session.palette().await;
    assert_eq!(palette.len(), 2);
    assert_eq!(palette[0].name, "Blue");
    assert_eq!(palette[1].hex, "#C2B280");
}
