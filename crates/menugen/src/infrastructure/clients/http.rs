use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use crate::domain::models::{Cuisine, Menu, MenuClient, PlaylistRef};
use crate::errors::MenuError;

pub const RECIPES_PATH: &str = "/v1.0/recipes/";
pub const PLAYLISTS_PATH: &str = "/v1.0/playlists/";

/// Client for the generator backend's recipe and playlist resources.
pub struct HttpMenuClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpMenuClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        value: &str,
    ) -> Result<T, MenuError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[(key, value)]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|err| {
            tracing::error!(url = %url, error = %err, "Fetch error");
            MenuError::from(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown status");
            tracing::error!(url = %url, status = status.as_u16(), reason, "Fetch error");
            return Err(MenuError::Status {
                status: status.as_u16(),
                reason: reason.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|err| {
            tracing::error!(url = %url, error = %err, "Fetch error");
            MenuError::from(err)
        })?;

        serde_json::from_slice(&body).map_err(|err| {
            tracing::error!(url = %url, error = %err, "Fetch error: unexpected body");
            MenuError::from(err)
        })
    }
}

#[async_trait]
impl MenuClient for HttpMenuClient {
    async fn fetch_recipes(&self, cuisine: &Cuisine) -> Result<Menu, MenuError> {
        self.get_json(RECIPES_PATH, "cuisine", cuisine.as_str()).await
    }

    async fn fetch_playlist(&self, theme: &Cuisine) -> Result<PlaylistRef, MenuError> {
        self.get_json(PLAYLISTS_PATH, "theme", theme.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::DEFAULT_PLACEHOLDER;
    use mockito::Matcher;

    fn cuisine(value: &str) -> Cuisine {
        Cuisine::parse(value, DEFAULT_PLACEHOLDER).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_recipes_sends_query_and_accept_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", RECIPES_PATH)
            .match_query(Matcher::UrlEncoded(
                "cuisine".to_string(),
                "Latin American".to_string(),
            ))
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"menu": [{"course": "main", "title": "Arepas", "servings": 4,
                    "readyInMinutes": 40, "ingredients": [{"amount": 2, "unit": "cups", "name": "masarepa"}]}]}"#,
            )
            .create_async()
            .await;

        let client = HttpMenuClient::new(format!("{}/", server.url()));
        let menu = client
            .fetch_recipes(&cuisine("Latin American"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(menu.menu.len(), 1);
        assert_eq!(menu.menu[0].title, "Arepas");
        assert_eq!(menu.menu[0].ingredients[0].line(), "2 cups masarepa");
    }

    #[tokio::test]
    async fn test_fetch_playlist_accepts_bare_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PLAYLISTS_PATH)
            .match_query(Matcher::UrlEncoded("theme".to_string(), "Thai".to_string()))
            .with_status(200)
            .with_body(r#""37i9dQZF1DX4""#)
            .create_async()
            .await;

        let client = HttpMenuClient::new(server.url());
        let playlist = client.fetch_playlist(&cuisine("Thai")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(playlist.id(), "37i9dQZF1DX4");
    }

    #[tokio::test]
    async fn test_non_success_status_carries_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", RECIPES_PATH)
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("upstream down")
            .create_async()
            .await;

        let client = HttpMenuClient::new(server.url());
        let err = client.fetch_recipes(&cuisine("Greek")).await.unwrap_err();

        assert_eq!(
            err,
            MenuError::Status {
                status: 502,
                reason: "Bad Gateway".to_string()
            }
        );
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", RECIPES_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"recipes": "nope"}"#)
            .create_async()
            .await;

        let client = HttpMenuClient::new(server.url());
        let err = client.fetch_recipes(&cuisine("Greek")).await.unwrap_err();

        assert!(matches!(err, MenuError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = HttpMenuClient::new("http://127.0.0.1:9")
            .with_timeout(Duration::from_millis(500));
        let err = client.fetch_playlist(&cuisine("Irish")).await.unwrap_err();

        assert!(matches!(err, MenuError::Transport(_)));
    }
}
