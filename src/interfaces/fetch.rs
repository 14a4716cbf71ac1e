//! 注入式抓取能力
//!
//! 适配器不拥有传输层：宿主注入实现了 [`Fetch`] 的对象，返回状态码、
//! 重定向信息与响应正文。超时、重试与迭代上限都是宿主的职责。

use async_trait::async_trait;

use crate::core::error::Result;

/// 一次抓取的结果
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    /// 服务端是否把请求重定向到了别的地址
    pub redirected: bool,
    /// 跟随重定向之后的最终地址
    pub final_url: String,
    /// 响应正文文本
    pub body: String,
}

/// HTTP 抓取能力接口
#[async_trait]
pub trait Fetch: Send + Sync {
    /// 抓取单个地址并跟随重定向
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}
