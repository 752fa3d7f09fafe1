//! Route names for request spans.

use uuid::Uuid;

/// `METHOD /path` with identifier segments collapsed, e.g. `GET /products/{id}`.
pub(super) fn route_name(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("{method} /{}", segments.join("/"))
}
