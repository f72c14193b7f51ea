//! HTTP types used by the middleware seam.

use bytes::Bytes;
use http_body_util::Full;
use strabo_core::VersioningError;

/// The HTTP request type flowing through the middleware chain.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type flowing through the middleware chain.
pub type Response = http::Response<Full<Bytes>>;

/// Extension trait for building error responses.
pub trait ResponseExt {
    /// Creates a JSON error-envelope response from a versioning error.
    fn versioning_error(err: &VersioningError) -> Response;
}

impl ResponseExt for Response {
    fn versioning_error(err: &VersioningError) -> Response {
        let body = serde_json::to_string(&err.to_envelope())
            .expect("error envelope serializes");

        http::Response::builder()
            .status(err.status_code())
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .expect("valid response")
    }
}
