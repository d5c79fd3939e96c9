// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 规范化用户输入的URL
///
/// 缺少协议时补全 `https://`，移除片段标识符，保证输出
/// 始终以 `http://` 或 `https://` 开头。规范化是幂等的：
/// `normalize_url(normalize_url(u)) == normalize_url(u)`
pub fn normalize_url(raw: &str) -> Result<Url, ParseError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = Url::parse(&candidate)?;
    url.set_fragment(None);
    Ok(url)
}

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 判断两个URL是否同源（主机名相同）
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_scheme() {
        let url = normalize_url("example.com/pricing").unwrap();
        assert_eq!(url.as_str(), "https://example.com/pricing");
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        let url = normalize_url("http://example.com").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_normalize_strips_fragment() {
        let url = normalize_url("https://example.com/page#section").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["example.com", "  https://example.com/a#b  ", "http://t.co/c?q=1"] {
            let once = normalize_url(raw).unwrap();
            let twice = normalize_url(once.as_str()).unwrap();
            assert_eq!(once, twice);
            assert!(twice.as_str().starts_with("http://") || twice.as_str().starts_with("https://"));
        }
    }

    #[test]
    fn test_resolve_absolute_url() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        assert_eq!(
            resolve_url(&base, "http://t.co/c").unwrap().as_str(),
            "http://t.co/c"
        );
    }

    #[test]
    fn test_resolve_root_relative_url() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        assert_eq!(
            resolve_url(&base, "/c").unwrap().as_str(),
            "http://example.com/c"
        );
    }

    #[test]
    fn test_same_origin() {
        let a = Url::parse("https://example.com/pricing").unwrap();
        let b = Url::parse("https://example.com/about").unwrap();
        let c = Url::parse("https://other.com/").unwrap();
        assert!(same_origin(&a, &b));
        assert!(!same_origin(&a, &c));
    }
}
