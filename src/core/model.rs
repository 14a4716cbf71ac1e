//! 数据模型
//!
//! 四个公开操作的输入输出结构。所有对象在构造后不再变更，
//! 也不做任何持久化。

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 未参与排名时的哨兵值，所有负数视为同等
pub const UNRANKED: i64 = -1;

fn default_ranking() -> i64 {
    UNRANKED
}

/// 搜索结果中的一个系列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// 展示标题（已规范化）
    pub name: String,
    /// 站点内稳定的系列标识
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// 相对相关度，越小越靠前；负数表示未排名
    #[serde(default = "default_ranking")]
    pub ranking: i64,
}

/// 搜索结果列表，插入顺序即排名顺序
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesSummaryList {
    pub results: Vec<SeriesSummary>,
}

/// 章节条目
///
/// `identifier` 是唯一保证后续可用于页解析的字段，原样传回
/// `get_chapter` 即可，宿主不需要理解其内部结构。
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct ChapterEntry {
    /// 章节号文本，可能带小数（如 "12.5"）
    #[builder(into)]
    pub number: String,
    #[builder(into)]
    pub title: String,
    #[serde(default)]
    #[builder(into, default)]
    pub description: String,
    /// 不透明的章节标识符令牌
    #[builder(into)]
    pub identifier: String,
    /// 汉化/翻译组，站点提供时填写
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// 同一章节存在多个版本且组名不足以区分时的变体标记
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

/// 章节列表，顺序与源页面的文档顺序一致
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChapterEntryList {
    pub chapters: Vec<ChapterEntry>,
}

/// URL 后处理函数，缺省为恒等变换
pub type UrlTransform = fn(String) -> String;

/// 单页图片描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// 全分辨率图片地址
    pub high_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_url: Option<String>,
    #[serde(skip)]
    pub high_transform: Option<UrlTransform>,
    #[serde(skip)]
    pub low_transform: Option<UrlTransform>,
}

impl PageDescriptor {
    pub fn new(high_url: impl Into<String>) -> Self {
        Self {
            high_url: high_url.into(),
            low_url: None,
            high_transform: None,
            low_transform: None,
        }
    }

    /// 应用后处理之后的高清地址
    pub fn resolved_high(&self) -> String {
        match self.high_transform {
            Some(f) => f(self.high_url.clone()),
            None => self.high_url.clone(),
        }
    }

    /// 应用后处理之后的低清地址
    pub fn resolved_low(&self) -> Option<String> {
        self.low_url.as_ref().map(|url| match self.low_transform {
            Some(f) => f(url.clone()),
            None => url.clone(),
        })
    }
}

/// 章节内容，页序即阅读顺序
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChapterContent {
    pub pages: Vec<PageDescriptor>,
}
