//! MangaKatana 索引器
//!
//! 负责搜索结果、系列详情与章节列表的解析。所有解析都是纯函数：
//! 输入一页 HTML，输出结构化记录；必填字段缺失的行整行丢弃，
//! 绝不产出残缺记录。

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::core::config::SinceFilter;
use crate::core::error::{Result, SourceError};
use crate::core::model::{ChapterEntry, SeriesSummary};
use crate::engine::PageExtractor;
use crate::interfaces::FetchResponse;
use crate::utils::{normalize_text, to_absolute_url};

use super::codec;
use super::selectors::SiteSelectors;

/// 系列链接里内嵌的数字 id（`/series/<id>/...` 形式的结果页布局）
fn series_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/series/(?P<id>\d+)/").unwrap())
}

/// 章节号：可选的 chapter/chap/ch 前缀，后跟可带小数的数字
fn chapter_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)ch(?:ap(?:ter)?)?[\s.]*([0-9]+(?:\.[0-9]+)?)").unwrap())
}

/// 取链接路径的最后一个非空段
fn trailing_path_segment(href: &str, base: &Url) -> Option<String> {
    let url = match Url::parse(href) {
        Ok(u) => u,
        Err(_) => base.join(href).ok()?,
    };
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()
        .map(str::to_string)
}

/// 从链接推导系列 id：优先取正则捕获的数字 id，退回末尾路径段
fn derive_series_id(href: &str, base: &Url) -> Option<String> {
    if let Some(caps) = series_id_regex().captures(href) {
        return Some(caps["id"].to_string());
    }
    trailing_path_segment(href, base)
}

/// 沿祖先找到包含章节单元格的表格行
fn enclosing_row<'a>(cell: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    cell.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")
}

/// 站点使用的几种更新时间写法，全部解析失败时返回 None（视为未知）
pub fn parse_update_time(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    const FORMATS: [&str; 3] = ["%b-%d-%Y", "%b %d, %Y", "%Y-%m-%d"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// MangaKatana 索引器
pub struct MangaKatanaIndexer {
    base: Url,
}

impl MangaKatanaIndexer {
    /// 创建新的索引器
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// 解析一行搜索结果，标题链接或系列 id 缺失时整行丢弃
    fn parse_search_row(
        &self,
        row: &ElementRef,
        title_sel: &Selector,
        cover_sel: &Selector,
        rank: i64,
    ) -> Option<SeriesSummary> {
        let link = row.select(title_sel).next()?;
        let href = link.value().attr("href")?;
        let name = normalize_text(&link.text().collect::<String>());
        let identifier = derive_series_id(href, &self.base)?;

        let cover_url = row
            .select(cover_sel)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| to_absolute_url(&self.base, src));

        Some(SeriesSummary {
            name,
            identifier,
            cover_url,
            ranking: rank,
        })
    }

    /// 解析一页搜索结果，返回本页系列与下一页链接
    ///
    /// `next_rank` 是跨页连续的排名计数器，由编排层持有。
    pub fn parse_search_page(
        &self,
        html: &str,
        next_rank: &mut i64,
    ) -> (Vec<SeriesSummary>, Option<String>) {
        let doc = Html::parse_document(html);
        let s = SiteSelectors::get();

        // 两种观测到的结果页布局：常规书单与 series-list 网格
        let mut rows: Vec<ElementRef> = doc.select(&s.book_list_item).collect();
        let (title_sel, cover_sel) = if rows.is_empty() {
            rows = doc.select(&s.series_list_item).collect();
            (&s.series_item_title, &s.series_item_cover)
        } else {
            (&s.item_title_link, &s.cover_img)
        };

        let results = rows
            .iter()
            .filter_map(|row| {
                match self.parse_search_row(row, title_sel, cover_sel, *next_rank) {
                    Some(series) => {
                        *next_rank += 1;
                        Some(series)
                    }
                    None => {
                        debug!("dropping search row without title link or id");
                        None
                    }
                }
            })
            .collect();

        let next_url = doc
            .select(&s.next_page)
            .next()
            .and_then(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(|href| to_absolute_url(&self.base, href));

        (results, next_url)
    }

    /// 把重定向后的详情页解析为单个精确匹配
    pub fn parse_detail_page(&self, final_url: &str, html: &str) -> Result<SeriesSummary> {
        let doc = Html::parse_document(html);
        let s = SiteSelectors::get();

        let heading = doc.select(&s.detail_heading).next().ok_or_else(|| {
            SourceError::Parse("series heading not found on detail page".into())
        })?;
        let name = normalize_text(&heading.text().collect::<String>());

        let identifier = trailing_path_segment(final_url, &self.base)
            .ok_or_else(|| SourceError::Parse("series id missing from detail url".into()))?;

        let cover_url = doc
            .select(&s.cover_img)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| to_absolute_url(&self.base, src));

        Ok(SeriesSummary {
            name,
            identifier,
            cover_url,
            ranking: 0,
        })
    }

    /// 解析系列详情页的 #single_book 容器
    pub fn parse_series_info(&self, series_id: &str, html: &str) -> Result<SeriesSummary> {
        let doc = Html::parse_document(html);
        let s = SiteSelectors::get();

        let container = doc
            .select(&s.single_book)
            .next()
            .ok_or_else(|| SourceError::Parse("series container not found".into()))?;

        let heading = container
            .select(&s.single_book_heading)
            .next()
            .ok_or_else(|| SourceError::Parse("series heading not found".into()))?;
        let name = normalize_text(&heading.text().collect::<String>());

        let cover_url = container
            .select(&s.single_book_cover)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| to_absolute_url(&self.base, src));

        Ok(SeriesSummary {
            name,
            identifier: series_id.to_string(),
            cover_url,
            ranking: 0,
        })
    }

    /// 解析系列页上的全部章节行，顺序与文档顺序一致
    pub fn parse_chapter_rows(
        &self,
        series_id: &str,
        html: &str,
        since: Option<DateTime<Utc>>,
        since_filter: SinceFilter,
    ) -> Result<Vec<ChapterEntry>> {
        let doc = Html::parse_document(html);
        let s = SiteSelectors::get();

        let mut chapters = Vec::new();
        for container in doc.select(&s.chapters_container) {
            for cell in container.select(&s.chapter_cell) {
                if let Some(entry) = self.parse_chapter_row(series_id, &cell, since, since_filter)? {
                    chapters.push(entry);
                }
            }
        }
        Ok(chapters)
    }

    /// 解析单个章节行
    ///
    /// 更新时间从所在表格行的 `.update_time` 单元格读取，解析失败视为
    /// 未知而不是丢行；标题里提不出章节号的行（如纯番外）整行丢弃。
    fn parse_chapter_row(
        &self,
        series_id: &str,
        cell: &ElementRef,
        since: Option<DateTime<Utc>>,
        since_filter: SinceFilter,
    ) -> Result<Option<ChapterEntry>> {
        let s = SiteSelectors::get();

        let updated = enclosing_row(cell)
            .and_then(|row| row.select(&s.update_time).next())
            .and_then(|el| parse_update_time(&el.text().collect::<String>()));

        if since_filter == SinceFilter::Drop
            && let (Some(updated), Some(cutoff)) = (updated, since)
            && updated < cutoff
        {
            debug!(%updated, %cutoff, "dropping chapter row older than cutoff");
            return Ok(None);
        }

        let Some(link) = cell.select(&s.anchor).next() else {
            debug!("dropping chapter row without link");
            return Ok(None);
        };
        let Some(href) = link.value().attr("href") else {
            debug!("dropping chapter row without link target");
            return Ok(None);
        };

        let title = normalize_text(&link.text().collect::<String>());
        let Some(number) = chapter_number_regex()
            .captures(&title)
            .map(|caps| caps[1].to_string())
        else {
            debug!(%title, "dropping chapter row without chapter number");
            return Ok(None);
        };

        let Some(chapter_id) = trailing_path_segment(href, &self.base) else {
            debug!(href, "dropping chapter row with unusable link");
            return Ok(None);
        };
        let identifier = codec::encode(&chapter_id, series_id)?;

        Ok(Some(
            ChapterEntry::builder()
                .number(number)
                .title(title)
                .identifier(identifier)
                .maybe_updated(updated)
                .build(),
        ))
    }
}

/// 搜索结果的分页提取器：跨页维护连续的排名计数
pub struct SearchPageExtractor<'a> {
    indexer: &'a MangaKatanaIndexer,
    next_rank: i64,
}

impl<'a> SearchPageExtractor<'a> {
    pub fn new(indexer: &'a MangaKatanaIndexer) -> Self {
        Self {
            indexer,
            next_rank: 0,
        }
    }
}

impl PageExtractor<SeriesSummary> for SearchPageExtractor<'_> {
    fn extract(&mut self, page: &FetchResponse) -> Result<(Vec<SeriesSummary>, Option<String>)> {
        Ok(self.indexer.parse_search_page(&page.body, &mut self.next_rank))
    }
}
