use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::fixtures::MenuFixture;
use crate::handlers::{get_playlist, get_recipes, health_check};

pub struct MockServer {
    fixture: Arc<MenuFixture>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::with_fixture(MenuFixture::create_test_fixture())
    }

    pub fn with_fixture(fixture: MenuFixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/v1.0/recipes/", get(get_recipes))
            .route("/v1.0/playlists/", get(get_playlist))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.fixture.clone())
    }

    /// Binds `addr` (port 0 picks a free one) and serves in the background.
    pub async fn spawn(self, addr: &str) -> anyhow::Result<SocketAddr> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let app = self.router();

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "mock backend stopped");
            }
        });

        tracing::info!("Menu backend mock listening on http://{}", local_addr);
        Ok(local_addr)
    }

    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Menu backend mock listening on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}
