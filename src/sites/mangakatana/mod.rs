//! MangaKatana 站点模块
//!
//! 四个公开操作的编排：搜索走分页遍历，被服务端重定向时短路为
//! 精确匹配；章节页解析先定位携带 data-src 标记的脚本，再交给
//! 页数组提取器。每个操作都是独立的请求/响应序列。

mod codec;
mod fetcher;
mod indexer;
mod selectors;

use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, info};
use url::Url;

use crate::core::config::SourceConfig;
use crate::core::error::{Result, SourceError};
use crate::core::model::{
    ChapterContent, ChapterEntryList, SeriesSummary, SeriesSummaryList,
};
use crate::engine::PaginationWalker;
use crate::interfaces::{ChapterOrder, ChapterQuery, Source};
use crate::network::client::SiteClient;
use crate::utils::to_absolute_url;

pub use self::indexer::{MangaKatanaIndexer, SearchPageExtractor};
pub use self::selectors::SiteSelectors;

const DEFAULT_BASE_URL: &str = "https://mangakatana.com";

/// MangaKatana 站点实现
pub struct MangaKatana {
    config: SourceConfig,
    base: Url,
    indexer: MangaKatanaIndexer,
    client: SiteClient,
}

impl MangaKatana {
    /// 创建新的站点实例
    pub fn new(config: SourceConfig, client: SiteClient) -> Self {
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base = Url::parse(base_url).expect("Invalid base URL");

        Self {
            indexer: MangaKatanaIndexer::new(base.clone()),
            client,
            base,
            config,
        }
    }

    /// 搜索地址：查询词里的空白替换为字面 `+`，固定按书名搜索
    fn search_url(&self, name: &str) -> String {
        let query = name.split_whitespace().collect::<Vec<_>>().join("+");
        to_absolute_url(&self.base, &format!("/?search={query}&search_by=book_name"))
    }

    /// 系列详情页地址
    fn series_url(&self, series_id: &str) -> String {
        to_absolute_url(&self.base, &format!("/manga/{series_id}"))
    }

    /// 章节阅读页地址
    fn chapter_url(&self, series_id: &str, chapter_id: &str) -> String {
        to_absolute_url(&self.base, &format!("/manga/{series_id}/{chapter_id}"))
    }
}

/// 找到第一个携带 data-src 标记的脚本文本
fn find_reader_script(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let s = SiteSelectors::get();

    doc.select(&s.script)
        .map(|el| el.text().collect::<String>())
        .find(|text| text.contains("data-src"))
}

#[async_trait]
impl Source for MangaKatana {
    fn id(&self) -> &str {
        "mangakatana"
    }

    fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.base.as_str()
    }

    async fn search_series(
        &self,
        name: &str,
        offset: usize,
        limit: usize,
    ) -> Result<SeriesSummaryList> {
        info!(name, offset, limit, "searching series");

        let url = self.search_url(name);
        let response = self.client.get(&url).await?;

        // 精确命中时服务端直接重定向到详情页，不走结果列表
        if response.redirected {
            debug!(final_url = %response.final_url, "redirected to exact match");
            let series = self
                .indexer
                .parse_detail_page(&response.final_url, &response.body)?;
            return Ok(SeriesSummaryList {
                results: vec![series],
            });
        }

        let target = offset.saturating_add(limit);
        let mut extractor = SearchPageExtractor::new(&self.indexer);
        let walker = PaginationWalker::new(&self.client, target);
        let results = walker.walk(response, &mut extractor).await?;

        Ok(SeriesSummaryList {
            results: results.into_iter().skip(offset).collect(),
        })
    }

    async fn series_info(&self, series_id: &str) -> Result<SeriesSummary> {
        let body = self.client.get_text(&self.series_url(series_id)).await?;
        self.indexer.parse_series_info(series_id, &body)
    }

    async fn list_chapters(
        &self,
        series_id: &str,
        query: &ChapterQuery,
    ) -> Result<ChapterEntryList> {
        let body = self.client.get_text(&self.series_url(series_id)).await?;

        let mut chapters = self.indexer.parse_chapter_rows(
            series_id,
            &body,
            query.since,
            self.config.since_filter,
        )?;

        if query.order == ChapterOrder::Desc {
            chapters.reverse();
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        let chapters = chapters
            .into_iter()
            .skip(query.offset)
            .take(limit)
            .collect();

        Ok(ChapterEntryList { chapters })
    }

    async fn get_chapter(&self, chapter_identifier: &str) -> Result<ChapterContent> {
        let (chapter_id, series_id) = codec::decode(chapter_identifier)?;
        debug!(%chapter_id, %series_id, "resolving chapter pages");

        let body = self
            .client
            .get_text(&self.chapter_url(&series_id, &chapter_id))
            .await?;

        let script = find_reader_script(&body).ok_or(SourceError::ChapterPageNotFound)?;
        let pages = fetcher::extract_pages(&script)?;

        Ok(ChapterContent { pages })
    }
}
