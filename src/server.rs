//! HTTP server initialization and runtime setup.
//!
//! Handles store opening, seeding, chain construction, and the Axum server
//! lifecycle.

use crate::api::chain::{build_chain, default_fallback};
use crate::application::services::Seeder;
use crate::config::Config;
use crate::domain::entities::PathMap;
use crate::domain::lookup_source::LookupSource;
use crate::domain::repositories::RedirectRepository;
use crate::infrastructure::persistence::RedbRedirectRepository;
use crate::routes::app_router;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Paths served from memory when nothing earlier in the chain matches.
pub fn builtin_paths() -> PathMap {
    [
        (
            "/urlshort-godoc",
            "https://godoc.org/github.com/gophercises/urlshort",
        ),
        ("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
    ]
    .into_iter()
    .collect()
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - redb store (opened once, closed after shutdown)
/// - Startup seeding from `SEED_FILE`
/// - Seed reload on `SIGHUP`
/// - Handler chain: store, paths file, built-in paths, hello handler
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened
/// - A seed or paths file is malformed
/// - Server bind fails
pub async fn run(config: Config) -> Result<()> {
    let mut sources = Vec::new();

    let (store, reload_task) = if config.store_enabled {
        let store = Arc::new(
            RedbRedirectRepository::open(&config.store_path, config.store_open_timeout())
                .await
                .context("Failed to open redirect store")?,
        );

        let seeder = Arc::new(Seeder::new(store.clone(), config.seed_source()?));
        seeder.seed().await.context("Failed to seed redirect store")?;

        #[cfg(unix)]
        let reload_task = Some(spawn_reload_on_hangup(seeder));
        #[cfg(not(unix))]
        let reload_task: Option<JoinHandle<()>> = None;

        sources.push(LookupSource::durable(store.clone()));
        (Some(store), reload_task)
    } else {
        tracing::info!("Redirect store disabled");
        (None, None)
    };

    if let Some(paths_file) = config.paths_source()? {
        let pairs = paths_file
            .load()
            .await
            .with_context(|| format!("Failed to load {}", paths_file.path.display()))?;
        let map = PathMap::from_pairs(pairs);
        tracing::info!(
            "Loaded {} paths from {}",
            map.len(),
            paths_file.path.display()
        );
        sources.push(LookupSource::from_map(map));
    }

    sources.push(LookupSource::from_map(builtin_paths()));

    let app = app_router(build_chain(sources, default_fallback()));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = reload_task {
        task.abort();
    }
    if store.is_some() {
        tracing::info!("Server stopped, releasing redirect store");
    }

    Ok(())
}

/// Re-seeds the store each time the process receives `SIGHUP`.
#[cfg(unix)]
fn spawn_reload_on_hangup<R>(seeder: Arc<Seeder<R>>) -> JoinHandle<()>
where
    R: RedirectRepository + 'static,
{
    use tokio::signal::unix::{SignalKind, signal};

    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(hangup) => hangup,
            Err(e) => {
                tracing::warn!("Failed to install SIGHUP handler: {}. Reload disabled.", e);
                return;
            }
        };

        while hangup.recv().await.is_some() {
            tracing::info!("SIGHUP received, reloading seed file");
            if let Err(e) = seeder.seed().await {
                tracing::error!("Reload failed, keeping previous store contents: {}", e);
            }
        }
    })
}

/// Waits for Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
