use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::{GitHubRepo, GitHubUser, ProfileBundle, RandomUserResponse, UserRecord};

/// Creates a preconfigured HTTP client with required headers.
pub fn build_client(token: Option<&str>) -> FetchResult<Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("gitcompare-client"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

    if let Some(token) = token {
        let mut val = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| FetchError::InvalidToken)?;
        val.set_sensitive(true);
        headers.insert(AUTHORIZATION, val);
    }

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(FetchError::Client)
}

/// Talks to the GitHub and randomuser.me APIs.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    github_api: Url,
    randomuser_api: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> FetchResult<Self> {
        Ok(Self {
            http: build_client(config.github_token.as_deref())?,
            github_api: parse_base(&config.github_api)?,
            randomuser_api: parse_base(&config.randomuser_api)?,
        })
    }

    /// Fetches a GitHub user by username.
    pub async fn fetch_user(&self, username: &str) -> FetchResult<GitHubUser> {
        let url = with_segments(&self.github_api, &["users", username]);
        debug!(%url, "fetching user");

        let response = self.get(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::UserNotFound(username.to_string()));
        }
        decode(response, "GitHub user").await
    }

    /// Fetches up to 100 of the user's repositories, most recently updated first.
    pub async fn fetch_user_repos(&self, username: &str) -> FetchResult<Vec<GitHubRepo>> {
        let mut url = with_segments(&self.github_api, &["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", "100")
            .append_pair("sort", "updated");
        debug!(%url, "fetching repositories");

        let response = self.get(url).await?;
        decode(response, "repository list").await
    }

    /// Fetches the profile and then its repositories.
    pub async fn fetch_profile(&self, username: &str) -> FetchResult<ProfileBundle> {
        let user = self.fetch_user(username).await?;
        let repos = self.fetch_user_repos(&user.login).await?;
        info!(login = %user.login, repos = repos.len(), "profile fetched");
        Ok(ProfileBundle { user, repos })
    }

    /// Fetches both profiles concurrently. Fails as a whole if either side fails.
    pub async fn fetch_pair(
        &self,
        left: &str,
        right: &str,
    ) -> FetchResult<(ProfileBundle, ProfileBundle)> {
        tokio::try_join!(self.fetch_profile(left), self.fetch_profile(right))
    }

    /// Fetches a batch of synthetic user records.
    pub async fn fetch_random_users(&self, count: u32) -> FetchResult<Vec<UserRecord>> {
        let mut url = with_segments(&self.randomuser_api, &[""]);
        url.query_pairs_mut().append_pair("results", &count.to_string());
        debug!(%url, "fetching random users");

        let response = self.get(url).await?;
        let batch: RandomUserResponse = decode(response, "random user").await?;
        info!(count = batch.results.len(), "random users fetched");
        Ok(batch.results)
    }

    async fn get(&self, url: Url) -> FetchResult<Response> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)
    }
}

async fn decode<T: DeserializeOwned>(response: Response, what: &'static str) -> FetchResult<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Status { status, body });
    }

    response
        .json::<T>()
        .await
        .map_err(|source| FetchError::Decode { what, source })
}

fn parse_base(raw: &str) -> FetchResult<Url> {
    match Url::parse(raw) {
        Ok(url) if !url.cannot_be_a_base() => Ok(url),
        _ => Err(FetchError::InvalidBaseUrl(raw.to_string())),
    }
}

/// Appends percent-encoded path segments to `base`.
fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
