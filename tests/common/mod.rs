#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use path_redirect::api::chain::{build_chain, default_fallback};
use path_redirect::domain::lookup_source::LookupSource;
use path_redirect::infrastructure::persistence::RedbRedirectRepository;
use path_redirect::routes::app_router;
use tempfile::TempDir;

/// A redb store in a temporary directory, removed on drop.
pub struct TestStore {
    pub repo: Arc<RedbRedirectRepository>,
    pub dir: TempDir,
}

impl TestStore {
    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("test.db")
    }
}

pub async fn create_test_store() -> TestStore {
    let dir = tempfile::tempdir().unwrap();
    let repo = RedbRedirectRepository::open(dir.path().join("test.db"), Duration::from_secs(1))
        .await
        .unwrap();

    TestStore {
        repo: Arc::new(repo),
        dir,
    }
}

pub fn create_test_server(sources: Vec<LookupSource>) -> TestServer {
    let app = app_router(build_chain(sources, default_fallback()));
    TestServer::new(app).unwrap()
}
