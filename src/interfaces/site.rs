//! 源定义
//!
//! 聚合宿主面向的统一接口：每个站点适配器实现 [`Source`]，
//! 提供搜索、详情、章节列表与章节页解析四个操作。

use async_trait::async_trait;
use bon::Builder;
use chrono::{DateTime, Utc};

use crate::core::config::SourceConfig;
use crate::core::error::Result;
use crate::core::model::{ChapterContent, ChapterEntryList, SeriesSummary, SeriesSummaryList};

/// 章节列表排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChapterOrder {
    /// 源页面的文档顺序
    #[default]
    Asc,
    /// 文档顺序的逆序
    Desc,
}

/// 章节列表查询参数
#[derive(Debug, Clone, Builder, Default)]
pub struct ChapterQuery {
    #[builder(default)]
    pub offset: usize,
    /// 不设上限时返回全部章节
    pub limit: Option<usize>,
    /// 截止时间，配合 [`crate::core::config::SinceFilter`] 使用
    pub since: Option<DateTime<Utc>>,
    #[builder(default)]
    pub order: ChapterOrder,
}

/// 站点适配器统一接口
///
/// 每个操作都是独立的无状态请求/响应序列，操作内部的抓取严格串行：
/// 下一页地址只有在解析完当前页之后才会出现。
#[async_trait]
pub trait Source: Send + Sync {
    /// 源唯一标识
    fn id(&self) -> &str;

    /// 源配置
    fn config(&self) -> &SourceConfig;

    /// 基础 URL
    fn base_url(&self) -> &str;

    /// 按名称搜索系列，精确命中时返回单元素列表
    async fn search_series(
        &self,
        name: &str,
        offset: usize,
        limit: usize,
    ) -> Result<SeriesSummaryList>;

    /// 获取单个系列的摘要信息
    async fn series_info(&self, series_id: &str) -> Result<SeriesSummary>;

    /// 列出系列的章节
    async fn list_chapters(
        &self,
        series_id: &str,
        query: &ChapterQuery,
    ) -> Result<ChapterEntryList>;

    /// 把章节标识符令牌解析为有序页列表
    async fn get_chapter(&self, chapter_identifier: &str) -> Result<ChapterContent>;
}
