//! 章节标识符编解码
//!
//! 把 (chapter_id, series_id) 序列化为单个不透明令牌：JSON 之后走
//! URL-safe Base64。令牌自含全部信息，解码不依赖任何查表或外部状态，
//! 也不需要调用方做百分号转义。

use base64::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SourceError};

/// 令牌的内部结构，对宿主不可见
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct ChapterToken {
    chap_id: String,
    series_id: String,
}

/// 编码 (chapter_id, series_id) 为不透明令牌
pub fn encode(chapter_id: &str, series_id: &str) -> Result<String> {
    let json = serde_json::to_string(&ChapterToken {
        chap_id: chapter_id.to_string(),
        series_id: series_id.to_string(),
    })?;
    Ok(BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

/// 解码令牌，还原 (chapter_id, series_id)
pub fn decode(token: &str) -> Result<(String, String)> {
    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(token.as_bytes())
        .map_err(|e| SourceError::MalformedIdentifier(e.to_string()))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| SourceError::MalformedIdentifier(e.to_string()))?;
    let parsed: ChapterToken = serde_json::from_str(&json)
        .map_err(|e| SourceError::MalformedIdentifier(e.to_string()))?;
    Ok((parsed.chap_id, parsed.series_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_printable_pairs() {
        let pairs = [
            ("c1", "12345"),
            ("chapter-12.5", "one-piece.123"),
            ("ex/omake", "series with spaces"),
            ("日本語", "漫画"),
            ("", ""),
        ];

        for (chap, series) in pairs {
            let token = encode(chap, series).unwrap();
            assert_eq!(decode(&token).unwrap(), (chap.to_string(), series.to_string()));
        }
    }

    #[test]
    fn tokens_are_url_safe() {
        let token = encode("c1~!@#$%", "s/?&=+").unwrap();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "token uses characters outside the url-safe alphabet: {token}"
        );
    }

    #[test]
    fn distinct_pairs_yield_distinct_tokens() {
        let a = encode("c1", "s2").unwrap();
        let b = encode("c1", "s3").unwrap();
        let c = encode("c2", "s2").unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = decode("%%%not-base64%%%").unwrap_err();
        assert!(matches!(err, SourceError::MalformedIdentifier(_)));
    }

    #[test]
    fn rejects_payload_with_wrong_shape() {
        // 合法 base64 + 合法 JSON，但不是两字段结构
        let token = BASE64_URL_SAFE_NO_PAD.encode(br#"{"only_one":"field"}"#);
        let err = decode(&token).unwrap_err();
        assert!(matches!(err, SourceError::MalformedIdentifier(_)));
    }

    #[test]
    fn rejects_non_json_payload() {
        let token = BASE64_URL_SAFE_NO_PAD.encode(b"plain text");
        let err = decode(&token).unwrap_err();
        assert!(matches!(err, SourceError::MalformedIdentifier(_)));
    }
}
