use std::sync::OnceLock;

use regex::Regex;
use url::Url;

/// 把相对/协议相对链接解析为站点下的绝对 URL
pub fn to_absolute_url(base: &Url, href: &str) -> String {
    if href.is_empty() {
        return String::new();
    }

    if let Some(path_without_slashes) = href.strip_prefix("//") {
        return format!("{}://{}", base.scheme(), path_without_slashes);
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// 清洗从标记中提取的可读文本
///
/// 把连续空白（含换行与制表符）压成单个空格，反转义字面的 `&amp;`，
/// 去掉首尾空白。对自身输出幂等，所有进入数据模型的文本字段都先经过这里。
pub fn normalize_text(raw: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let ws = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());

    ws.replace_all(raw, " ").replace("&amp;", "&").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize_text("a   b\n\tc"), "a b c");
    }

    #[test]
    fn unescapes_ampersand_entity() {
        assert_eq!(normalize_text("Foo &amp; Bar"), "Foo & Bar");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["  a   b\n\tc  ", "Foo &amp; Bar", "already clean"] {
            let once = normalize_text(raw);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn resolves_relative_and_protocol_relative_urls() {
        let base = Url::parse("https://mangakatana.com/manga/x").unwrap();
        assert_eq!(
            to_absolute_url(&base, "/page/2"),
            "https://mangakatana.com/page/2"
        );
        assert_eq!(
            to_absolute_url(&base, "//cdn.example/cover.jpg"),
            "https://cdn.example/cover.jpg"
        );
        assert_eq!(
            to_absolute_url(&base, "https://other.example/x"),
            "https://other.example/x"
        );
        assert_eq!(to_absolute_url(&base, ""), "");
    }
}
