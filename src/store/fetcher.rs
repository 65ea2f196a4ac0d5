//! Remote rule file fetching
//!
//! The store talks to upstream through the [`Fetcher`] trait; production
//! uses [`HttpFetcher`], tests substitute in-memory implementations.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{trace, warn};
use ureq::Agent;

use crate::errors::{Result, UaDetectorError};

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the resource at `url`, returning the raw body bytes.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    /// 获取 fetcher 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// HTTP fetcher with connect/read timeouts.
///
/// `ureq` is synchronous, so each request runs inside `spawn_blocking`; the
/// agent itself is a cheap handle and is shared across requests.
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_connect(Some(connect_timeout))
            .timeout_global(Some(connect_timeout + read_timeout))
            .build()
            .into();
        Self { agent }
    }

    fn fetch_sync(agent: &Agent, url: &str) -> Result<Vec<u8>> {
        let resp = agent.get(url).call().map_err(|e| {
            UaDetectorError::network_unavailable(format!("GET {} failed: {}", url, e))
        })?;

        trace!("GET {} -> {}", url, resp.status());

        resp.into_body().read_to_vec().map_err(|e| {
            UaDetectorError::network_unavailable(format!(
                "reading response body of {} failed: {}",
                url, e
            ))
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let agent = self.agent.clone();
        let url = url.to_string();

        // 使用 spawn_blocking 在线程池中执行同步 HTTP 请求
        tokio::task::spawn_blocking(move || Self::fetch_sync(&agent, &url))
            .await
            .unwrap_or_else(|e| {
                warn!("fetch task failed to run: {}", e);
                Err(UaDetectorError::network_unavailable(format!(
                    "fetch task failed to run: {}",
                    e
                )))
            })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
