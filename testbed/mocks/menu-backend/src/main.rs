use std::env;

use menu_backend_mock::MockServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let addr = env::var("MENU_BACKEND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    MockServer::new().serve(&addr).await
}
