//! MangaKatana 站点适配器 (Source Adapter)
//!
//! 把 MangaKatana 封装为统一的四操作接口：系列搜索、系列详情、
//! 章节列表、章节页解析。宿主通过 [`interfaces::Source`] 集成，
//! 每次调用都是无状态的独立请求，核心不缓存、不重试、不持久化。

pub mod core;
pub mod engine;
pub mod interfaces;
pub mod network;
pub mod sites;
pub mod utils;

pub use crate::core::config::{AppConfig, SinceFilter, SourceConfig};
pub use crate::core::error::{Result, SourceError};
pub use crate::core::model::{
    ChapterContent, ChapterEntry, ChapterEntryList, PageDescriptor, SeriesSummary,
    SeriesSummaryList,
};
pub use crate::interfaces::{ChapterOrder, ChapterQuery, Fetch, FetchResponse, Source};
pub use crate::network::client::{HttpFetcher, SiteClient};
pub use crate::sites::SourceRegistry;
