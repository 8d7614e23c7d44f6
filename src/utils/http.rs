//! HTTP utility functions for extracting request information.

use actix_web::HttpRequest;

/// Extract the client IP address from a request
///
/// Checks `X-Real-IP` first, then the first entry of `X-Forwarded-For`, and
/// falls back to the connection peer address. No format validation is done;
/// the address is treated as an opaque tracking key. Deployments terminating
/// TLS at a proxy should make sure that proxy sets one of these headers.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    if let Some(real_ip) = header_value(req, "X-Real-IP") {
        return real_ip;
    }

    // X-Forwarded-For can contain multiple hops; the first is the client.
    if let Some(forwarded) = header_value(req, "X-Forwarded-For") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Extract the user agent from request headers
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

/// Extract the endpoint identifier used as the anomaly-tracking key
///
/// Uses the matched route pattern when routing has resolved one, otherwise
/// the raw request path. Patterns keep the key cardinality bounded for
/// parameterized routes.
pub fn extract_endpoint(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| req.path().to_string())
}

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    let value = req.headers().get(name)?.to_str().ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn real_ip_header_wins() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "203.0.113.5"))
            .insert_header(("X-Forwarded-For", "198.51.100.1, 10.0.0.1"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "203.0.113.5");
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "198.51.100.1, 10.0.0.1"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "198.51.100.1");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.4:443".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "192.0.2.4");
    }

    #[test]
    fn endpoint_defaults_to_path() {
        let req = TestRequest::get().uri("/api/trips/42").to_http_request();
        assert_eq!(extract_endpoint(&req), "/api/trips/42");
    }
}
