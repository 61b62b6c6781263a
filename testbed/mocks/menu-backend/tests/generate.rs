use std::sync::Arc;

use menu_backend_mock::{MenuFixture, MockServer};
use menugen::{Document, Generator, HttpMenuClient, MenuError, Outcome, RETRY_NOTICE};
use tokio::sync::Mutex;

async fn generator_for(fixture: MenuFixture) -> Generator<Document> {
    let addr = MockServer::with_fixture(fixture)
        .spawn("127.0.0.1:0")
        .await
        .expect("Failed to start mock server");
    let client = Arc::new(HttpMenuClient::new(format!("http://{addr}")));

    Generator::attach(client, Arc::new(Mutex::new(Document::standard())))
        .await
        .expect("standard document resolves")
}

#[tokio::test]
async fn test_generates_against_mock_backend() {
    let generator = generator_for(MenuFixture::default()).await;
    generator.page().lock().await.choose("Italian");

    let outcome = generator.generate().await;

    let Outcome::Rendered(report) = outcome else {
        panic!("expected a rendered outcome, got {outcome:?}");
    };
    assert!(report.is_clean());
    assert_eq!(report.rendered.len(), 3);

    let page = generator.page();
    let page = page.lock().await;
    assert_eq!(page.inner_html("dessert_title"), Some("Italian dessert"));
    assert_eq!(
        page.attribute("embedded_player", "src"),
        Some("https://open.spotify.com/embed/playlist/37i9dQZF1DX2sUQwD7tbmL?utm_source=generator")
    );
    assert_eq!(page.is_shown("generated_content"), Some(true));
}

#[tokio::test]
async fn test_unavailable_backend_fails_with_notice() {
    let mut fixture = MenuFixture::default();
    fixture.mark_unavailable("Korean");
    let generator = generator_for(fixture).await;
    generator.page().lock().await.choose("Korean");

    let outcome = generator.generate().await;

    assert_eq!(
        outcome,
        Outcome::Failed(MenuError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
        })
    );
    let page = generator.page();
    let page = page.lock().await;
    assert_eq!(page.alerts(), [RETRY_NOTICE.to_string()]);
    assert_eq!(page.attribute("embedded_player", "src"), None);
}
