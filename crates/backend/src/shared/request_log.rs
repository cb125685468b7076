use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Thousands separated by dots: `1234567` -> `"1.234.567"`
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// One line per request: time, duration, body size, status, method, path.
/// The body is buffered to report its real size.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let (bytes, size) = match to_bytes(body, usize::MAX).await {
        Ok(b) => {
            let size = format_number(b.len());
            (Some(b), size)
        }
        Err(_) => (None, "error".to_string()),
    };

    tracing::info!(
        target: "http",
        "{:>5}ms | {:>12} | {} {:>6} {}",
        start.elapsed().as_millis(),
        size,
        parts.status.as_u16(),
        method,
        uri.path()
    );

    match bytes {
        Some(b) => Response::from_parts(parts, Body::from(b)),
        None => Response::from_parts(parts, Body::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }
}
