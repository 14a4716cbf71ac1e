//! MangaKatana 选择器
//!
//! 预编译的 CSS 选择器

use std::sync::OnceLock;

use scraper::Selector;

/// 站点选择器集合
pub struct SiteSelectors {
    pub book_list_item: Selector,
    pub item_title_link: Selector,
    pub cover_img: Selector,
    pub series_list_item: Selector,
    pub series_item_title: Selector,
    pub series_item_cover: Selector,
    pub detail_heading: Selector,
    pub single_book: Selector,
    pub single_book_cover: Selector,
    pub single_book_heading: Selector,
    pub chapters_container: Selector,
    pub chapter_cell: Selector,
    pub anchor: Selector,
    pub update_time: Selector,
    pub next_page: Selector,
    pub script: Selector,
}

static SELECTORS: OnceLock<SiteSelectors> = OnceLock::new();

impl SiteSelectors {
    /// 获取全局选择器实例
    pub fn get() -> &'static SiteSelectors {
        SELECTORS.get_or_init(|| SiteSelectors {
            book_list_item: Selector::parse("#book_list > .item").unwrap(),
            item_title_link: Selector::parse(".title > a").unwrap(),
            cover_img: Selector::parse("img[alt='[cover]' i]").unwrap(),
            series_list_item: Selector::parse("div#series-list div.col.no-flag").unwrap(),
            series_item_title: Selector::parse("a.item-title").unwrap(),
            series_item_cover: Selector::parse("a.item-cover > img").unwrap(),
            detail_heading: Selector::parse(".info > h1").unwrap(),
            single_book: Selector::parse("#single_book").unwrap(),
            single_book_cover: Selector::parse(".cover > img").unwrap(),
            single_book_heading: Selector::parse(".info > .heading").unwrap(),
            chapters_container: Selector::parse(".chapters").unwrap(),
            chapter_cell: Selector::parse(".chapter").unwrap(),
            anchor: Selector::parse("a").unwrap(),
            update_time: Selector::parse(".update_time").unwrap(),
            next_page: Selector::parse("a.next.page-numbers").unwrap(),
            script: Selector::parse("script").unwrap(),
        })
    }
}
