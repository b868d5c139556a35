//! Read-only display views of HTTP requests and responses.
//!
//! Views clone the data they need out of borrowed `http` types and return
//! plain JSON objects in the shapes the log platform expects (`req.*`,
//! `res.*`). The source request/response is never mutated; the borrow
//! guarantees it.

use std::net::SocketAddr;

use http::{HeaderMap, Request, Response};
use serde_json::map::Entry;
use serde_json::{Map, Value, json};

/// The peer address of a connection, carried as a request extension.
///
/// Servers that know the peer socket insert this before the middleware
/// runs; without it, remote identity falls back to forwarded headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoteAddr(pub SocketAddr);

/// Builds the `req` view: `method`, `url`, `query`, `headers`,
/// `remoteAddress`, `remotePort`.
#[must_use]
pub fn request_view<B>(req: &Request<B>) -> Value {
    let mut view = Map::new();
    view.insert("method".to_string(), json!(req.method().as_str()));
    view.insert("url".to_string(), json!(req.uri().to_string()));
    if let Some(query) = req.uri().query() {
        view.insert("query".to_string(), json!(query));
    }
    view.insert("headers".to_string(), headers_value(req.headers()));
    let (address, port) = remote_identity(req);
    if let Some(address) = address {
        view.insert("remoteAddress".to_string(), json!(address));
    }
    if let Some(port) = port {
        view.insert("remotePort".to_string(), json!(port));
    }
    Value::Object(view)
}

/// Builds the `req` view with an explicit `body` value.
///
/// The middleware never captures bodies (they stream); this is for callers
/// that already hold one.
#[must_use]
pub fn request_view_with_body<B>(req: &Request<B>, body: Value) -> Value {
    let mut view = request_view(req);
    if let Value::Object(map) = &mut view {
        map.insert("body".to_string(), body);
    }
    view
}

/// Builds the `res` view: `statusCode`, `header`, `headers`.
#[must_use]
pub fn response_view<B>(res: &Response<B>) -> Value {
    let mut view = Map::new();
    view.insert("statusCode".to_string(), json!(res.status().as_u16()));
    view.insert("header".to_string(), json!(header_block(res)));
    view.insert("headers".to_string(), headers_value(res.headers()));
    Value::Object(view)
}

/// Renders headers as a JSON object; repeated names collect into arrays.
fn headers_value(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for (name, value) in headers {
        let text = json!(value.to_str().unwrap_or("<binary>"));
        match map.entry(name.as_str().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(text);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(items) => items.push(text),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, text]);
                }
            },
        }
    }
    Value::Object(map)
}

/// The raw response head as a single string, status line first.
fn header_block<B>(res: &Response<B>) -> String {
    let mut block = format!("{:?} {}", res.version(), res.status());
    for (name, value) in res.headers() {
        block.push_str("\r\n");
        block.push_str(name.as_str());
        block.push_str(": ");
        block.push_str(value.to_str().unwrap_or("<binary>"));
    }
    block
}

/// Remote address and port from the [`RemoteAddr`] extension, falling back
/// to `x-forwarded-for` (first hop) then `x-real-ip`.
fn remote_identity<B>(req: &Request<B>) -> (Option<String>, Option<u16>) {
    if let Some(RemoteAddr(addr)) = req.extensions().get::<RemoteAddr>() {
        return (Some(addr.ip().to_string()), Some(addr.port()));
    }
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|hop| hop.trim().to_string())
        .filter(|hop| !hop.is_empty())
        .or_else(|| {
            req.headers()
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        });
    (forwarded, None)
}

#[cfg(test)]
mod tests {
    use http::{Request, Response};
    use serde_json::json;

    use super::{RemoteAddr, request_view, request_view_with_body, response_view};

    #[test]
    fn request_view_carries_the_wire_shape() {
        let req = Request::builder()
            .method("POST")
            .uri("http://svc.local/widgets?page=2")
            .header("content-type", "application/json")
            .body(())
            .unwrap();
        let view = request_view(&req);
        assert_eq!(view["method"], json!("POST"));
        assert_eq!(view["url"], json!("http://svc.local/widgets?page=2"));
        assert_eq!(view["query"], json!("page=2"));
        assert_eq!(view["headers"]["content-type"], json!("application/json"));
    }

    #[test]
    fn remote_identity_prefers_the_extension() {
        let mut req = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "10.0.0.9")
            .body(())
            .unwrap();
        req.extensions_mut()
            .insert(RemoteAddr("127.0.0.1:9000".parse().unwrap()));
        let view = request_view(&req);
        assert_eq!(view["remoteAddress"], json!("127.0.0.1"));
        assert_eq!(view["remotePort"], json!(9000));
    }

    #[test]
    fn remote_identity_falls_back_to_forwarded_headers() {
        let req = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "10.0.0.9, 172.16.0.1")
            .body(())
            .unwrap();
        let view = request_view(&req);
        assert_eq!(view["remoteAddress"], json!("10.0.0.9"));
        assert!(view.get("remotePort").is_none());
    }

    #[test]
    fn repeated_headers_collect_into_arrays() {
        let req = Request::builder()
            .uri("/")
            .header("accept", "text/html")
            .header("accept", "application/json")
            .body(())
            .unwrap();
        let view = request_view(&req);
        assert_eq!(
            view["headers"]["accept"],
            json!(["text/html", "application/json"])
        );
    }

    #[test]
    fn body_is_attached_only_on_request() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let view = request_view_with_body(&req, json!({"q": "x"}));
        assert_eq!(view["body"], json!({"q": "x"}));
        assert!(request_view(&req).get("body").is_none());
    }

    #[test]
    fn response_view_carries_status_and_headers() {
        let res = Response::builder()
            .status(404)
            .header("content-length", "9")
            .body(())
            .unwrap();
        let view = response_view(&res);
        assert_eq!(view["statusCode"], json!(404));
        assert_eq!(view["headers"]["content-length"], json!("9"));
        let header = view["header"].as_str().unwrap();
        assert!(header.starts_with("HTTP/1.1 404 Not Found"));
        assert!(header.contains("content-length: 9"));
    }
}
