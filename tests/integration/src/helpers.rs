//! Test helpers for integration tests
//!
//! `TestServer` owns a running server bound to an ephemeral port and the
//! in-memory backend behind it.

use std::net::SocketAddr;
use std::time::Duration;

use agora_api::{create_app, create_memory_app_state, serve};
use agora_common::{AppConfig, JwtService};
use agora_core::{EntityId, Post, PostKind};
use agora_db::MemoryBackend;
use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{unique_id, TestUser};

const JWT_SECRET: &str = "integration-test-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub backend: MemoryBackend,
    jwt: JwtService,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let backend = MemoryBackend::new();
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        let state = create_memory_app_state(config, &backend)?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            backend,
            jwt,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Seed a post in the content store
    pub fn create_post(&self, author: EntityId, kind: PostKind) -> EntityId {
        let id = unique_id();
        self.backend.posts.insert(Post::new(id, author, kind));
        id
    }

    /// Bearer token for a test user
    pub fn token(&self, user: &TestUser) -> Result<String> {
        Ok(self.jwt.issue_token(user.id, user.role)?)
    }

    /// `GET` without credentials
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_as(&self, path: &str, user: &TestUser) -> Result<Response> {
        self.send_as(self.client.get(self.url(path)), user).await
    }

    pub async fn put_as(&self, path: &str, user: &TestUser) -> Result<Response> {
        self.send_as(self.client.put(self.url(path)), user).await
    }

    pub async fn delete_as(&self, path: &str, user: &TestUser) -> Result<Response> {
        self.send_as(self.client.delete(self.url(path)), user).await
    }

    /// `GET` with a raw `Authorization` header value
    pub async fn get_with_authorization(&self, path: &str, value: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header("Authorization", value)
            .send()
            .await?)
    }

    /// React to a post, asserting success
    pub async fn react(&self, post: EntityId, user: &TestUser, reaction_type: &str) -> Result<()> {
        let response = self
            .put_as(&format!("/api/v1/reactions/Post/{post}/{reaction_type}"), user)
            .await?;
        assert_status(response, StatusCode::NO_CONTENT).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    async fn send_as(&self, request: RequestBuilder, user: &TestUser) -> Result<Response> {
        let token = self.token(user)?;
        Ok(request.bearer_auth(token).send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Configuration for a memory-backed server with a generous rate limit
pub fn test_config() -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|key| {
        let value = match key {
            "STORAGE_BACKEND" => Some("memory"),
            "API_PORT" => Some("0"),
            "JWT_SECRET" => Some(JWT_SECRET),
            "RATE_LIMIT_REQUESTS_PER_SECOND" => Some("1000"),
            "RATE_LIMIT_BURST" => Some("10000"),
            _ => None,
        };
        value.map(String::from)
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Reactions query path for a post
pub fn reactions_path(post: EntityId, page: Option<i64>, per_page: Option<i64>) -> String {
    let mut path = format!("/api/v1/reactions?parent={post}&parentType=Post");
    if let Some(page) = page {
        path.push_str(&format!("&page={page}"));
    }
    if let Some(per_page) = per_page {
        path.push_str(&format!("&perPage={per_page}"));
    }
    path
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
