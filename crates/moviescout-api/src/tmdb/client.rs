//! HTTP implementation of [`TmdbApi`](super::TmdbApi) backed by `reqwest`.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::rate_limiter::RequestPacer;
use super::types::{
    CatalogEndpoint, MovieDetails, MoviePage, MovieQueryParams, TmdbErrorResponse,
};

/// Public TMDB API v3 root.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Retries granted to a request answered with HTTP 429.
const MAX_RETRIES: u32 = 3;

/// Backoff unit; the n-th retry waits n times this long.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Client for the TMDB v3 movie endpoints.
///
/// Safe to share behind an `Arc` between concurrently spawned fetches;
/// the request pacer is shared by all of them.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    http_client: Client,
    /// API root every endpoint path is joined onto.
    base_url: Url,
    api_token: String,
    pacer: RequestPacer,
    retry_backoff: Duration,
}

/// Builder for `TmdbClient`.
///
/// `api_token` and `user_agent` are mandatory; everything else falls back
/// to the public API defaults.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
    retry_backoff: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Points the client at another API root (wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// TMDB v4 read access token, sent as a bearer credential.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// User-Agent header sent with every request.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Minimum spacing between two requests (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Backoff unit between HTTP 429 retries (default: 1s).
    #[must_use]
    pub const fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    /// Finishes the builder.
    ///
    /// # Errors
    ///
    /// Fails when the token is missing or blank, when no user agent was
    /// given, or when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<TmdbClient> {
        let Some(api_token) = self.api_token.filter(|t| !t.trim().is_empty()) else {
            bail!("api_token is required");
        };
        let Some(user_agent) = self.user_agent else {
            bail!("user_agent is required");
        };
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };

        let http_client = Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            pacer: self
                .min_interval
                .map_or_else(RequestPacer::default_interval, RequestPacer::new),
            retry_backoff: self.retry_backoff.unwrap_or(RETRY_BACKOFF),
        })
    }
}

/// Turns a non-success response body into a readable error message.
fn describe_failure(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<TmdbErrorResponse>(body).map_or_else(
        |_| format!("TMDB API error (HTTP {status}): {body}"),
        |error| {
            format!(
                "TMDB API error (HTTP {status}): code={}, message={}",
                error.status_code, error.status_message
            )
        },
    )
}

impl TmdbClient {
    /// Starts a [`TmdbClientBuilder`].
    #[must_use]
    pub fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::default()
    }

    /// Sends one paced, authenticated GET. HTTP 429 answers are retried
    /// with a linearly growing backoff, at most `MAX_RETRIES` times.
    async fn send(&self, url: &Url, query: &[(&str, String)]) -> Result<Response> {
        let mut attempt = 0u32;
        loop {
            self.pacer.wait().await;
            tracing::debug!(url = %url, "TMDB API request");

            let response = self
                .http_client
                .get(url.clone())
                .bearer_auth(&self.api_token)
                .query(query)
                .send()
                .await
                .with_context(|| format!("request failed: {}", url.path()))?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }
            if attempt >= MAX_RETRIES {
                bail!(
                    "TMDB API rate limit exceeded after {MAX_RETRIES} retries: {}",
                    url.path()
                );
            }
            attempt = attempt.saturating_add(1);
            tracing::warn!(attempt, max_retries = MAX_RETRIES, "TMDB API rate limited (429)");
            tokio::time::sleep(self.retry_backoff.saturating_mul(attempt)).await;
        }
    }

    /// Fetches `path` relative to the base URL and decodes the JSON body.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let response = self.send(&url, query).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;

        if !status.is_success() {
            bail!(describe_failure(status, &body));
        }
        serde_json::from_str(&body).with_context(|| format!("failed to decode JSON response: {path}"))
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all, fields(endpoint = ?endpoint, page = params.page))]
    async fn movies(
        &self,
        endpoint: CatalogEndpoint,
        params: &MovieQueryParams,
    ) -> Result<MoviePage> {
        let mut query: Vec<(&str, String)> = vec![
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if endpoint == CatalogEndpoint::Search {
            query.push(("query", params.query.clone()));
        }

        let page: MoviePage = self.get_json(endpoint.path(), &query).await?;
        tracing::debug!(
            results = page.results.len(),
            total_pages = page.total_pages,
            "movie page received"
        );
        Ok(page)
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<MovieDetails> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }
}
