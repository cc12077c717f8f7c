//! Joke API client.
//!
//! Fetches a single-line joke with one best-effort GET. There is no retry:
//! any failure is reported to the caller, and [`JokeClient::joke_or_fallback`]
//! swaps it for a fixed apology so the page always has something to show.

use serde::Deserialize;
use thiserror::Error;
use tracing::{instrument, warn};

/// Default joke endpoint.
pub const DEFAULT_JOKE_API_URL: &str = "https://v2.jokeapi.dev/joke/Any?type=single";

/// Text shown when no joke could be fetched.
pub const FALLBACK_JOKE: &str = "Oops! Couldn't fetch a joke right now.";

/// Errors that can occur when fetching a joke.
#[derive(Debug, Error)]
pub enum JokeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status}")]
    Api { status: u16 },

    /// Response did not contain a joke.
    #[error("Response had no joke")]
    MissingJoke,
}

#[derive(Debug, Deserialize)]
struct JokeResponse {
    #[serde(default)]
    joke: Option<String>,
}

/// Joke API client.
#[derive(Debug, Clone)]
pub struct JokeClient {
    client: reqwest::Client,
    url: String,
}

impl JokeClient {
    /// Create a client for `url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(url: impl Into<String>) -> Result<Self, JokeError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch one joke.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, undecodable body,
    /// or a body without a non-empty `joke` field.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<String, JokeError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(JokeError::Api {
                status: status.as_u16(),
            });
        }

        let body: JokeResponse = response.json().await?;
        body.joke
            .map(|j| j.trim().to_string())
            .filter(|j| !j.is_empty())
            .ok_or(JokeError::MissingJoke)
    }

    /// Fetch one joke, or the fallback text on any failure.
    pub async fn joke_or_fallback(&self) -> String {
        match self.fetch().await {
            Ok(joke) => joke,
            Err(e) => {
                warn!(error = %e, "Joke fetch failed, using fallback");
                FALLBACK_JOKE.to_string()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_returns_joke() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/joke/Any")
            .match_query(mockito::Matcher::UrlEncoded("type".into(), "single".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":false,"type":"single","joke":"I would tell a UDP joke, but you might not get it."}"#)
            .create_async()
            .await;

        let client = JokeClient::new(format!("{}/joke/Any?type=single", server.url())).unwrap();
        let joke = client.fetch().await.unwrap();

        assert_eq!(joke, "I would tell a UDP joke, but you might not get it.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/joke")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let client = JokeClient::new(format!("{}/joke", server.url())).unwrap();
        assert!(matches!(
            client.fetch().await,
            Err(JokeError::Api { status: 500 })
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_joke_field_falls_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/joke")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":true,"message":"No matching joke found"}"#)
            .create_async()
            .await;

        let client = JokeClient::new(format!("{}/joke", server.url())).unwrap();
        assert_eq!(client.joke_or_fallback().await, FALLBACK_JOKE);
    }

    #[tokio::test]
    async fn test_garbage_body_falls_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/joke")
            .with_status(200)
            .with_body("<html>nope</html>")
            .create_async()
            .await;

        let client = JokeClient::new(format!("{}/joke", server.url())).unwrap();
        assert_eq!(client.joke_or_fallback().await, FALLBACK_JOKE);
    }

    #[tokio::test]
    async fn test_unreachable_host_falls_back() {
        let client = JokeClient::new("http://127.0.0.1:9/joke").unwrap();
        assert_eq!(client.joke_or_fallback().await, FALLBACK_JOKE);
    }
}
