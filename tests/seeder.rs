mod common;

use std::sync::Arc;

use path_redirect::AppError;
use path_redirect::application::services::Seeder;
use path_redirect::domain::resolver::PathResolver;
use path_redirect::infrastructure::parser::{Format, PairFile};

#[tokio::test]
async fn test_seed_from_yaml_file() {
    let store = common::create_test_store().await;
    let file = store.dir.path().join("conf.yaml");
    tokio::fs::write(
        &file,
        "- path: /urlshort\n  url: https://github.com/gophercises/urlshort\n",
    )
    .await
    .unwrap();

    let seeder = Seeder::new(
        store.repo.clone(),
        Some(PairFile::detect(&file, None).unwrap()),
    );

    assert_eq!(seeder.seed().await.unwrap(), 1);
    assert_eq!(
        store.repo.resolve("/urlshort").await.unwrap(),
        Some("https://github.com/gophercises/urlshort".to_string())
    );
}

#[tokio::test]
async fn test_reseed_picks_up_changes() {
    let store = common::create_test_store().await;
    let file = store.dir.path().join("conf.json");
    let seeder = Seeder::new(
        store.repo.clone(),
        Some(PairFile::new(&file, Format::Json)),
    );

    tokio::fs::write(&file, r#"{"PathUrl": [{"path": "/a", "url": "https://v1.test"}]}"#)
        .await
        .unwrap();
    seeder.seed().await.unwrap();

    tokio::fs::write(
        &file,
        r#"{"PathUrl": [{"path": "/a", "url": "https://v2.test"}, {"path": "/b", "url": "https://b.test"}]}"#,
    )
    .await
    .unwrap();
    assert_eq!(seeder.seed().await.unwrap(), 2);

    assert_eq!(
        store.repo.resolve("/a").await.unwrap(),
        Some("https://v2.test".to_string())
    );
    assert_eq!(
        store.repo.resolve("/b").await.unwrap(),
        Some("https://b.test".to_string())
    );
}

#[tokio::test]
async fn test_missing_seed_file_keeps_existing_entries() {
    let store = common::create_test_store().await;
    let seeder = Seeder::new(store.repo.clone(), None);
    seeder
        .seed_bytes(b"- path: /kept\n  url: https://kept.test\n", Format::Yaml)
        .await
        .unwrap();

    let seeder = Seeder::new(
        store.repo.clone(),
        Some(PairFile::new(store.dir.path().join("absent.yaml"), Format::Yaml)),
    );

    assert_eq!(seeder.seed().await.unwrap(), 0);
    assert_eq!(
        store.repo.resolve("/kept").await.unwrap(),
        Some("https://kept.test".to_string())
    );
}

#[tokio::test]
async fn test_malformed_seed_leaves_store_untouched() {
    let store = common::create_test_store().await;
    let seeder = Seeder::new(Arc::clone(&store.repo), None);

    let result = seeder
        .seed_bytes(br#"{"PathUrl": [{"path": 123}]}"#, Format::Json)
        .await;

    assert!(matches!(result, Err(AppError::Parse(_))));
    assert_eq!(store.repo.resolve("/123").await.unwrap(), None);
}
