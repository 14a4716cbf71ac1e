//! 分页遍历器 (Pagination Walker)
//!
//! 以显式状态机驱动「抓取 -> 提取 -> 追加 -> 翻页」循环：
//! 累积到 limit 或没有下一页链接时停止。页内抓取严格串行，
//! 不做已访问地址的环检测，迭代上限由宿主自行约束。

use tracing::debug;

use crate::core::error::Result;
use crate::interfaces::FetchResponse;
use crate::network::client::SiteClient;

/// 单页批量提取器：从一页响应中取出本页结果与下一页链接
pub trait PageExtractor<T> {
    fn extract(&mut self, page: &FetchResponse) -> Result<(Vec<T>, Option<String>)>;
}

/// 遍历状态
enum WalkState {
    /// 正在抓取下一页
    Fetching(String),
    /// 正在提取当前页
    Extracting(FetchResponse),
    /// 遍历结束
    Done,
}

/// 分页遍历器
pub struct PaginationWalker<'a> {
    client: &'a SiteClient,
    limit: usize,
}

impl<'a> PaginationWalker<'a> {
    pub fn new(client: &'a SiteClient, limit: usize) -> Self {
        Self { client, limit }
    }

    /// 从一个已抓取的首页响应开始遍历，累积最多 `limit` 条结果
    ///
    /// 追加整批会超过 limit 时只取恰好补齐 limit 的前缀，随后不再翻页。
    pub async fn walk<T, E>(&self, first: FetchResponse, extractor: &mut E) -> Result<Vec<T>>
    where
        E: PageExtractor<T>,
    {
        let mut results: Vec<T> = Vec::new();
        let mut state = WalkState::Extracting(first);

        loop {
            state = match state {
                WalkState::Fetching(url) => {
                    debug!(%url, "loading next result page");
                    WalkState::Extracting(self.client.get(&url).await?)
                }
                WalkState::Extracting(page) => {
                    let (batch, next) = extractor.extract(&page)?;

                    let room = self.limit.saturating_sub(results.len());
                    results.extend(batch.into_iter().take(room));

                    if results.len() >= self.limit {
                        debug!(limit = self.limit, "result limit reached");
                        WalkState::Done
                    } else {
                        match next {
                            Some(url) => WalkState::Fetching(url),
                            None => {
                                debug!("no more result pages");
                                WalkState::Done
                            }
                        }
                    }
                }
                WalkState::Done => break,
            };
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::core::error::SourceError;
    use crate::interfaces::Fetch;

    /// 正文格式 "a,b,c;next-url"，分号后为空表示没有下一页
    struct LineExtractor;

    impl PageExtractor<String> for LineExtractor {
        fn extract(&mut self, page: &FetchResponse) -> Result<(Vec<String>, Option<String>)> {
            let (items, next) = page.body.split_once(';').unwrap_or((page.body.as_str(), ""));
            let batch = items
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            let next = (!next.is_empty()).then(|| next.to_string());
            Ok((batch, next))
        }
    }

    struct StubFetch {
        routes: HashMap<String, String>,
        hits: AtomicUsize,
    }

    impl StubFetch {
        fn new(routes: &[(&str, &str)]) -> Self {
            Self {
                routes: routes
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                hits: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Fetch for StubFetch {
        async fn fetch(&self, url: &str) -> Result<FetchResponse> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            let body = self
                .routes
                .get(url)
                .cloned()
                .ok_or_else(|| SourceError::Parse(format!("unexpected fetch: {url}")))?;
            Ok(FetchResponse {
                status: 200,
                redirected: false,
                final_url: url.to_string(),
                body,
            })
        }
    }

    fn first_page(body: &str) -> FetchResponse {
        FetchResponse {
            status: 200,
            redirected: false,
            final_url: "https://x/page/1".to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn stops_exactly_at_limit_across_pages() {
        let page1: Vec<String> = (0..10).map(|i| format!("p1-{i}")).collect();
        let page2: Vec<String> = (0..5).map(|i| format!("p2-{i}")).collect();
        let stub = Arc::new(StubFetch::new(&[(
            "https://x/page/2",
            &format!("{};", page2.join(",")),
        )]));
        let client = SiteClient::new(stub.clone());

        let walker = PaginationWalker::new(&client, 12);
        let results = walker
            .walk(
                first_page(&format!("{};https://x/page/2", page1.join(","))),
                &mut LineExtractor,
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 12);
        assert_eq!(results[..10], page1[..]);
        assert_eq!(results[10..], page2[..2]);
        // 首页在遍历前已抓取，到达 limit 后不再有第三次抓取
        assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stops_when_next_link_is_missing() {
        let stub = Arc::new(StubFetch::new(&[]));
        let client = SiteClient::new(stub.clone());

        let walker = PaginationWalker::new(&client, usize::MAX);
        let results = walker
            .walk(first_page("a,b,c;"), &mut LineExtractor)
            .await
            .unwrap();

        assert_eq!(results, ["a", "b", "c"]);
        assert_eq!(stub.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn limit_cuts_first_page_batch() {
        let stub = Arc::new(StubFetch::new(&[]));
        let client = SiteClient::new(stub);

        let walker = PaginationWalker::new(&client, 2);
        let results = walker
            .walk(first_page("a,b,c;https://x/page/2"), &mut LineExtractor)
            .await
            .unwrap();

        // 整批会超限，只取补齐 limit 的前缀，且不再抓取下一页
        assert_eq!(results, ["a", "b"]);
    }
}
