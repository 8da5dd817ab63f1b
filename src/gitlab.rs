use crate::{
    config::api_timestamp,
    error::ApiError,
    models::{Commit, Project, User},
    stream::{paginate, Page},
};
use async_trait::async_trait;
use chrono::{offset::Utc, DateTime};
use futures::TryStreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, LINK};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

const PER_PAGE: &str = "100";

/// The three remote operations the commit count is built from.
#[async_trait]
pub trait GitlabApi: Send + Sync {
    /// Look up a user by exact username. `None` when the instance has no match.
    async fn find_user(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Every project the token owns or is a member of, all pages.
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    /// Commits in one project by `author_id`, authored in `[since, until)`, all pages.
    async fn list_commits(
        &self,
        project_id: u64,
        author_id: u64,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Commit>, ApiError>;
}

pub struct GitlabClient {
    client: reqwest::Client,
    base: Url,
}

impl GitlabClient {
    pub fn new(host: &Url, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base: api_base(host)?,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base.join(path)?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("per_page", PER_PAGE);
        Ok(url)
    }

    async fn get_page<T: DeserializeOwned>(&self, url: Url) -> Result<Page<T>, ApiError> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
                message: message.trim().chars().take(200).collect(),
            });
        }

        let next = next_page_url(&url, response.headers());
        let items = response.json::<Vec<T>>().await?;
        Ok(Page { items, next })
    }

    async fn get_all<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ApiError> {
        paginate(url, move |url| self.get_page::<T>(url))
            .try_collect()
            .await
    }
}

#[async_trait]
impl GitlabApi for GitlabClient {
    async fn find_user(&self, username: &str) -> Result<Option<User>, ApiError> {
        let url = self.endpoint("users", &[("username", username.to_string())])?;
        let users = self.get_page::<User>(url).await?.items;

        Ok(users
            .into_iter()
            .find(|user| user.username.eq_ignore_ascii_case(username)))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let url = self.endpoint(
            "projects",
            &[
                ("membership", "true".to_string()),
                ("simple", "true".to_string()),
            ],
        )?;
        self.get_all(url).await
    }

    async fn list_commits(
        &self,
        project_id: u64,
        author_id: u64,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Commit>, ApiError> {
        let url = self.endpoint(
            &format!("projects/{}/repository/commits", project_id),
            &[
                ("author_id", author_id.to_string()),
                ("since", api_timestamp(since)),
                ("until", api_timestamp(until)),
            ],
        )?;
        self.get_all(url).await
    }
}

/// `https://host/sub` becomes `https://host/sub/api/v4/`
fn api_base(host: &Url) -> Result<Url, url::ParseError> {
    let mut root = host.clone();
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    root.join("api/v4/")
}

/// Next page of a listing. A `Link` target is only trusted on the origin of
/// the current request, since every request carries the access token.
fn next_page_url(current: &Url, headers: &HeaderMap) -> Option<Url> {
    if let Some(next) = headers
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_next_link)
    {
        if next.origin() == current.origin() {
            return Some(next);
        }
        debug!(%next, "ignoring next link on a different origin");
    }

    let page = headers.get("x-next-page")?.to_str().ok()?.trim();
    if page.is_empty() {
        return None;
    }

    let query: Vec<(String, String)> = current
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = current.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(query)
        .append_pair("page", page);
    Some(url)
}

/// Pick the `rel="next"` target out of an RFC 8288 `Link` header.
fn parse_next_link(header: &str) -> Option<Url> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        Url::parse(target.trim_start_matches('<').trim_end_matches('>')).ok()
    })
}
