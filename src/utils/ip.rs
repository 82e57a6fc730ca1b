//! 访客标识提取工具
//!
//! 提供统一的访客键提取功能：
//! - X-Forwarded-For（取第一个，即原始客户端 IP）
//! - X-Real-IP
//! - 连接对端 IP
//!
//! 以上全部缺失时退化为哨兵值 `unknown`。转发头按值采信，
//! 伪造头等同于切换身份，不做可信代理校验。

use actix_web::HttpRequest;

/// 无法确定访客来源时使用的哨兵键
///
/// 所有无身份请求共享这一个键，因此也共享同一条点赞记录。
pub const UNKNOWN_VISITOR: &str = "unknown";

/// 从 HttpRequest 提取访客键
///
/// 永远返回非空字符串，调用方不需要再做缺失处理。
pub fn extract_visitor_key(req: &HttpRequest) -> String {
    extract_forwarded_ip_from_headers(req.headers())
        .or_else(|| {
            req.connection_info()
                .peer_addr()
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .unwrap_or_else(|| UNKNOWN_VISITOR.to_string())
}

/// 从 HeaderMap 提取转发的 IP
pub fn extract_forwarded_ip_from_headers(
    headers: &actix_web::http::header::HeaderMap,
) -> Option<String> {
    // 优先 X-Forwarded-For（取第一个，即原始客户端 IP）
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            // 其次 X-Real-IP
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
    use actix_web::test::TestRequest;

    fn headers_with(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(
                HeaderName::from_lowercase(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        headers
    }

    #[test]
    fn test_forwarded_ip_takes_first_entry() {
        let headers = headers_with(&[("x-forwarded-for", "1.2.3.4, 10.0.0.1, 172.16.0.1")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("1.2.3.4".to_string())
        );
    }

    #[test]
    fn test_forwarded_ip_trims_whitespace() {
        let headers = headers_with(&[("x-forwarded-for", "  5.6.7.8 , 10.0.0.1")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("5.6.7.8".to_string())
        );
    }

    #[test]
    fn test_forwarded_ip_falls_back_to_real_ip() {
        let headers = headers_with(&[("x-real-ip", "9.9.9.9")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("9.9.9.9".to_string())
        );
    }

    #[test]
    fn test_forwarded_ip_prefers_xff_over_real_ip() {
        let headers = headers_with(&[("x-forwarded-for", "1.2.3.4"), ("x-real-ip", "9.9.9.9")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("1.2.3.4".to_string())
        );
    }

    #[test]
    fn test_forwarded_ip_empty_header_is_ignored() {
        let headers = headers_with(&[("x-forwarded-for", ""), ("x-real-ip", "9.9.9.9")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("9.9.9.9".to_string())
        );
    }

    #[test]
    fn test_forwarded_ip_none_when_absent() {
        let headers = HeaderMap::new();
        assert_eq!(extract_forwarded_ip_from_headers(&headers), None);
    }

    #[test]
    fn test_visitor_key_from_peer_addr() {
        let req = TestRequest::default()
            .peer_addr("3.3.3.3:40000".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_visitor_key(&req), "3.3.3.3");
    }

    #[test]
    fn test_visitor_key_header_beats_peer_addr() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "1.2.3.4"))
            .peer_addr("3.3.3.3:40000".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_visitor_key(&req), "1.2.3.4");
    }

    #[test]
    fn test_visitor_key_collapses_to_unknown() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_visitor_key(&req), UNKNOWN_VISITOR);
    }
}
