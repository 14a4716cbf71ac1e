//! MangaKatana 页数组提取器 (Page Array Extractor)
//!
//! 阅读页把页图地址以数组字面量内联在脚本里。这里用受限的字面量
//! 解析器还原数组，绝不把提取出来的脚本文本当代码执行。

use std::sync::OnceLock;

use regex::Regex;

use crate::core::error::{Result, SourceError};
use crate::core::model::PageDescriptor;

/// 页数组特征：存在以 1.jpg/1.png/1.jpeg 收尾的字符串元素
fn page_array_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\[[^\]]+,['"][^'"]+1\.(?:jpg|png|jpeg)["'][^\]]+\]"#).unwrap()
    })
}

/// 从脚本文本中取第一个页数组并解析成页列表
pub fn extract_pages(script: &str) -> Result<Vec<PageDescriptor>> {
    let matched = page_array_regex()
        .find(script)
        .ok_or(SourceError::PageArrayNotFound)?;

    let urls = parse_string_array(matched.as_str())?;
    Ok(urls.into_iter().map(PageDescriptor::new).collect())
}

/// 受限的数组字面量解析器
///
/// 只认字符串字面量（单双引号皆可，支持反斜杠转义）和数字/null 一类
/// 的裸标量；收集其中的字符串，其余一律跳过。任何结构破损、或整个
/// 数组凑不出一个字符串，都判定为解析失败。
fn parse_string_array(src: &str) -> Result<Vec<String>> {
    fn fail(msg: impl Into<String>) -> SourceError {
        SourceError::PageArrayParseError(msg.into())
    }

    let mut chars = src.chars().peekable();
    if chars.next() != Some('[') {
        return Err(fail("missing opening bracket"));
    }

    let mut strings = Vec::new();
    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }

        match chars.peek().copied() {
            None => return Err(fail("unterminated array")),
            Some(']') => break,
            Some(',') => {
                chars.next();
            }
            Some(quote @ ('\'' | '"')) => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        None => return Err(fail("unterminated string literal")),
                        Some('\\') => match chars.next() {
                            Some(escaped) => value.push(escaped),
                            None => return Err(fail("dangling escape")),
                        },
                        Some(c) if c == quote => break,
                        Some(c) => value.push(c),
                    }
                }
                strings.push(value);
            }
            Some(c) if c.is_ascii_alphanumeric() || "+-._".contains(c) => {
                while matches!(
                    chars.peek(),
                    Some(c) if c.is_ascii_alphanumeric() || "+-._".contains(*c)
                ) {
                    chars.next();
                }
            }
            Some(c) => return Err(fail(format!("unexpected character '{c}' in array"))),
        }
    }

    if strings.is_empty() {
        return Err(fail("array contains no string elements"));
    }
    Ok(strings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_matching_array_in_order() {
        let script = r#"
            var loaded=false;
            var thzq=[12,'https://i3.example/x/001.jpg','https://i3.example/x/002.jpg',0];
            render('data-src', thzq);
        "#;

        let pages = extract_pages(script).unwrap();
        let urls: Vec<&str> = pages.iter().map(|p| p.high_url.as_str()).collect();
        assert_eq!(
            urls,
            ["https://i3.example/x/001.jpg", "https://i3.example/x/002.jpg"]
        );
    }

    #[test]
    fn single_string_element_yields_single_page() {
        let script = r#"pages=[0,"https://x/001.jpg",9];"#;
        let pages = extract_pages(script).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].high_url, "https://x/001.jpg");
    }

    #[test]
    fn double_quoted_and_escaped_strings_are_supported() {
        let script = r#"var a=[1,"https:\/\/x\/a\/011.png","https://x/tail.png",2];"#;
        let pages = extract_pages(script).unwrap();
        assert_eq!(pages[0].high_url, "https://x/a/011.png");
        assert_eq!(pages[1].high_url, "https://x/tail.png");
    }

    #[test]
    fn missing_array_is_not_found() {
        let script = "var nothing = { 'data-src': true };";
        assert!(matches!(
            extract_pages(script),
            Err(SourceError::PageArrayNotFound)
        ));
    }

    #[test]
    fn structural_damage_is_a_parse_error() {
        // 正则能命中，但数组里混着对象字面量
        let script = r#"x=[{a:1},'https://x/001.jpg',{b:2}]"#;
        assert!(matches!(
            extract_pages(script),
            Err(SourceError::PageArrayParseError(_))
        ));
    }

    #[test]
    fn array_without_strings_is_a_parse_error() {
        assert!(matches!(
            parse_string_array("[1,2,3]"),
            Err(SourceError::PageArrayParseError(_))
        ));
    }
}
