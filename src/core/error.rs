//! 错误处理体系 (Error Handling System)
//!
//! 定义适配器的错误类型与全局 Result 别名。行级字段缺失不算错误，
//! 对应行直接被丢弃；只有页级与标识符级失败才上抛给调用方。

use thiserror::Error;

/// 全局错误定义 (Adapter Domain Errors)
#[derive(Error, Debug)]
pub enum SourceError {
    /// 传输层失败，原样上抛，核心不做重试
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 章节标识符无法还原为 (chapter_id, series_id) 对
    #[error("Malformed chapter identifier: {0}")]
    MalformedIdentifier(String),

    /// 阅读页脚本里找不到页数组
    #[error("Page array not found in reader script")]
    PageArrayNotFound,

    /// 页数组子串不是合法的字符串数组字面量
    #[error("Page array parse error: {0}")]
    PageArrayParseError(String),

    /// 阅读页缺少携带页数组标记的脚本
    #[error("Chapter reader script not found")]
    ChapterPageNotFound,

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// 全局 Result 别名
pub type Result<T> = std::result::Result<T, SourceError>;
