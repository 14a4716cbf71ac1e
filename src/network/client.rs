use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::core::error::Result;
use crate::interfaces::{Fetch, FetchResponse};

/// 基于 reqwest 的默认抓取实现
///
/// 跟随重定向后最终地址与请求地址不一致即视为被重定向。
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// 使用宿主提供的 reqwest 客户端（自定义 UA、代理等）
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let redirected = url::Url::parse(url)
            .map(|requested| requested != *resp.url())
            .unwrap_or(false);
        let body = resp.text().await?;

        debug!(url, status, redirected, "fetched page");
        Ok(FetchResponse {
            status,
            redirected,
            final_url,
            body,
        })
    }
}

/// 面向站点的 HTTP 客户端封装
#[derive(Clone)]
pub struct SiteClient {
    fetch: Arc<dyn Fetch>,
}

impl SiteClient {
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self { fetch }
    }

    /// 执行通用 GET 请求
    pub async fn get(&self, url: &str) -> Result<FetchResponse> {
        self.fetch.fetch(url).await
    }

    /// 获取文本内容
    pub async fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url).await?.body)
    }
}
