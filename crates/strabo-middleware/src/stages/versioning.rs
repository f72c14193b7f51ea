//! API version resolution middleware.
//!
//! This stage runs before host routing and performs the whole versioning
//! sequence for a request:
//!
//! 1. Extracts a version signal from the custom version header or a vendor
//!    media type in `accept` (the custom header wins).
//! 2. In passive mode, hands the request through untouched when no signal is
//!    present.
//! 3. Rejects versions outside the configured allow-list with a `400` error
//!    envelope before the handler runs.
//! 4. Substitutes the configured default when the signal is absent or
//!    malformed.
//! 5. Rewrites the routing target to a version-prefixed internal path when a
//!    genuinely version-specific route exists, preserving the query string
//!    byte for byte.
//! 6. Annotates the outgoing response with the resolved version.
//!
//! ## Preflight Requests
//!
//! A cross-origin preflight arrives as `OPTIONS` but routes on behalf of the
//! method named in `access-control-request-method`. The route table is
//! probed with that method instead of the literal `OPTIONS` verb; a
//! preflight without it is rejected as a client error before any matching.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use strabo_middleware::stages::VersioningMiddleware;
//! use strabo_policy::VersionPolicy;
//! use strabo_router::{Operations, RouteTable};
//!
//! let policy = VersionPolicy::builder()
//!     .valid_versions([1, 2])
//!     .default_version(1)
//!     .vendor_name("acme")
//!     .build()
//!     .unwrap();
//!
//! let mut routes = RouteTable::new();
//! routes.insert("/v1/users", Operations::new().get("listUsersV1"));
//!
//! let versioning = VersioningMiddleware::new(Arc::new(policy), Arc::new(routes));
//! ```

use crate::extract;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::state::RequestState;
use crate::types::{Request, Response, ResponseExt};
use http::{HeaderValue, Method, Uri};
use std::sync::Arc;
use strabo_core::{ApiVersion, VersioningError};
use strabo_policy::VersionPolicy;
use strabo_router::RouteTable;

/// Preflight header names.
pub mod headers {
    /// `Access-Control-Request-Method` header (preflight).
    pub const REQUEST_METHOD: &str = "access-control-request-method";
}

/// Middleware that resolves the API version and rewrites the routing path.
///
/// This middleware must run **before** routing: it replaces the request URI,
/// so any stage that inspects the path for dispatch has to see the rewritten
/// form. The policy and route table are shared immutably across requests.
#[derive(Debug, Clone)]
pub struct VersioningMiddleware {
    policy: Arc<VersionPolicy>,
    routes: Arc<RouteTable>,
}

impl VersioningMiddleware {
    /// Creates a versioning stage over a policy and the host's route table.
    #[must_use]
    pub fn new(policy: Arc<VersionPolicy>, routes: Arc<RouteTable>) -> Self {
        Self { policy, routes }
    }

    /// Returns the policy this stage enforces.
    #[must_use]
    pub fn policy(&self) -> &VersionPolicy {
        &self.policy
    }

    /// Determines the method to probe the route table with.
    ///
    /// A preflight `OPTIONS` request routes on behalf of the method named in
    /// `access-control-request-method`; an absent or empty value is a
    /// malformed preflight.
    fn probe_method(request: &Request) -> Result<Method, VersioningError> {
        if request.method() != Method::OPTIONS {
            return Ok(request.method().clone());
        }

        let requested = request
            .headers()
            .get(headers::REQUEST_METHOD)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if requested.is_empty() {
            return Err(VersioningError::malformed_preflight(
                "missing access-control-request-method header",
            ));
        }
        Method::from_bytes(requested.as_bytes()).map_err(|_| {
            VersioningError::malformed_preflight(format!(
                "unrecognized access-control-request-method: {requested}"
            ))
        })
    }

    /// Computes the version-prefixed routing target, if one applies.
    ///
    /// The rewrite only happens when the candidate path matches a route
    /// whose registered template carries the version prefix itself. Routes
    /// that exist identically across versions stay untouched. A malformed
    /// preflight is rejected before any path or base checks run, so the
    /// rejection does not depend on the configured base path.
    fn rewrite_target(
        &self,
        request: &Request,
        version: ApiVersion,
    ) -> Result<Option<Uri>, VersioningError> {
        let method = Self::probe_method(request)?;

        let path = request.uri().path();
        let Some(base) = self.policy.base_path().resolve(path) else {
            return Ok(None);
        };
        if !path.starts_with(&base) {
            return Ok(None);
        }

        // The prefix keeps the slash before the remainder, so slicing at
        // base.len() - 1 yields a remainder with its leading `/` intact.
        let prefix_len = base.len() - 1;
        let candidate = format!("{base}v{version}{}", &path[prefix_len..]);

        let Some(matched) = self.routes.match_route(&method, &candidate) else {
            tracing::debug!(%candidate, "no version-specific route, leaving path untouched");
            return Ok(None);
        };

        // The guard compares against the configured base path, which for a
        // templated base is the placeholder form the host registers routes
        // under.
        let guard = format!("{}v{version}/", self.policy.base_path().as_str());
        if !matched.template.starts_with(&guard) {
            tracing::debug!(
                template = matched.template,
                "matched route is not version-specific, leaving path untouched"
            );
            return Ok(None);
        }

        let source = request
            .uri()
            .path_and_query()
            .map_or(path, http::uri::PathAndQuery::as_str);
        let target = format!("{base}v{version}{}", &source[prefix_len..]);
        tracing::debug!(from = source, to = %target, "rewriting routing target");

        Ok(target.parse::<Uri>().ok())
    }

    /// Sets the version header on an outgoing response.
    fn annotate(&self, response: &mut Response, version: ApiVersion) {
        if let Ok(value) = HeaderValue::from_str(&version.to_string()) {
            response
                .headers_mut()
                .insert(self.policy.version_header().clone(), value);
        }
    }
}

impl Middleware for VersioningMiddleware {
    fn name(&self) -> &'static str {
        "versioning"
    }

    fn handle<'a>(
        &'a self,
        state: &'a mut RequestState,
        mut request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let signal = extract::resolve_signal(
                request.headers(),
                self.policy.version_header(),
                self.policy.vendor_name(),
            );

            // Passive mode opts unversioned traffic out entirely: no default
            // substitution, no annotation, no state.
            if signal.is_none() && self.policy.passive_mode() {
                return next.run(state, request).await;
            }

            if let Some(requested) = signal {
                if !self.policy.contains(requested.get()) {
                    let err = VersioningError::invalid_version(
                        requested.get(),
                        &self.policy.valid_versions(),
                    );
                    tracing::debug!(requested = requested.get(), "rejecting invalid version");
                    return Response::versioning_error(&err);
                }
            }

            let version = signal.unwrap_or_else(|| self.policy.default_version());
            state.set_resolved_version(version);

            match self.rewrite_target(&request, version) {
                Ok(Some(target)) => *request.uri_mut() = target,
                Ok(None) => {}
                Err(err) => {
                    let mut response = Response::versioning_error(&err);
                    self.annotate(&mut response, version);
                    return response;
                }
            }

            let mut response = next.run(state, request).await;
            self.annotate(&mut response, version);
            response
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{Request as HttpRequest, StatusCode};
    use http_body_util::{BodyExt, Full};
    use strabo_router::Operations;

    fn policy() -> VersionPolicy {
        VersionPolicy::builder()
            .valid_versions([1, 2])
            .default_version(1)
            .vendor_name("mysuperapi")
            .build()
            .unwrap()
    }

    fn routes() -> RouteTable {
        let mut table = RouteTable::new();
        table.insert("/v1/users", Operations::new().get("listUsersV1"));
        table.insert("/v2/users", Operations::new().get("listUsersV2"));
        table.insert("/v1/versioned", Operations::new().get("versionedV1"));
        table.insert("/unversioned", Operations::new().get("unversioned"));
        table
    }

    fn middleware(policy: VersionPolicy, routes: RouteTable) -> VersioningMiddleware {
        VersioningMiddleware::new(Arc::new(policy), Arc::new(routes))
    }

    fn request(method: Method, uri: &str, headers: &[(&str, &str)]) -> Request {
        let mut builder = HttpRequest::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Full::new(Bytes::new())).unwrap()
    }

    /// Terminal handler that echoes the routing target it received.
    fn echo_handler() -> Next<'static> {
        Next::handler(|_state, req: Request| {
            Box::pin(async move {
                let target = req
                    .uri()
                    .path_and_query()
                    .map_or_else(|| req.uri().path().to_string(), ToString::to_string);
                http::Response::builder()
                    .status(StatusCode::OK)
                    .header("x-routed-target", target)
                    .body(Full::new(Bytes::from("ok")))
                    .unwrap()
            })
        })
    }

    fn routed_target(response: &Response) -> Option<&str> {
        response
            .headers()
            .get("x-routed-target")
            .map(|v| v.to_str().unwrap())
    }

    fn version_header(response: &Response) -> Option<&str> {
        response
            .headers()
            .get("api-version")
            .map(|v| v.to_str().unwrap())
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_header_signal_rewrites_path() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(Method::GET, "/users", &[("api-version", "2")]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(routed_target(&response), Some("/v2/users"));
        assert_eq!(version_header(&response), Some("2"));
        assert_eq!(state.resolved_version(), Some(ApiVersion::new(2)));
    }

    #[tokio::test]
    async fn test_accept_signal_rewrites_path() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(
            Method::GET,
            "/users",
            &[("accept", "application/vnd.mysuperapi.v2+json")],
        );

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/v2/users"));
        assert_eq!(version_header(&response), Some("2"));
    }

    #[tokio::test]
    async fn test_custom_header_wins_over_accept() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(
            Method::GET,
            "/users",
            &[
                ("api-version", "1"),
                ("accept", "application/vnd.mysuperapi.v2+json"),
            ],
        );

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/v1/users"));
        assert_eq!(version_header(&response), Some("1"));
    }

    #[tokio::test]
    async fn test_invalid_version_rejected_before_handler() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(Method::GET, "/users", &[("api-version", "3")]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        // Nothing was resolved, so the response carries no version header
        // and the handler never ran.
        assert_eq!(version_header(&response), None);
        assert_eq!(routed_target(&response), None);
        assert_eq!(state.resolved_version(), None);

        let body = body_text(response).await;
        assert!(body.contains("Invalid api-version! Valid values: 1,2"), "{body}");
    }

    #[tokio::test]
    async fn test_malformed_signal_falls_back_to_default() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(Method::GET, "/users", &[("api-version", "asdf")]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(routed_target(&response), Some("/v1/users"));
        assert_eq!(version_header(&response), Some("1"));
    }

    #[tokio::test]
    async fn test_absent_signal_uses_default() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(Method::GET, "/users", &[]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/v1/users"));
        assert_eq!(state.resolved_version(), Some(ApiVersion::new(1)));
    }

    #[tokio::test]
    async fn test_passive_mode_without_signal_is_untouched() {
        let policy = VersionPolicy::builder()
            .valid_versions([1, 2])
            .default_version(1)
            .vendor_name("mysuperapi")
            .passive_mode(true)
            .build()
            .unwrap();
        let stage = middleware(policy, routes());
        let mut state = RequestState::new();
        let req = request(Method::GET, "/users", &[]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/users"));
        assert_eq!(version_header(&response), None);
        assert_eq!(state.resolved_version(), None);
    }

    #[tokio::test]
    async fn test_passive_mode_with_signal_resolves() {
        let policy = VersionPolicy::builder()
            .valid_versions([1, 2])
            .default_version(1)
            .vendor_name("mysuperapi")
            .passive_mode(true)
            .build()
            .unwrap();
        let stage = middleware(policy, routes());
        let mut state = RequestState::new();
        let req = request(Method::GET, "/users", &[("api-version", "2")]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/v2/users"));
        assert_eq!(version_header(&response), Some("2"));
    }

    #[tokio::test]
    async fn test_no_versioned_route_leaves_path_untouched() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(Method::GET, "/unversioned", &[("api-version", "1")]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        // No /v1/unversioned route exists; the request still resolves and
        // the response is still annotated.
        assert_eq!(routed_target(&response), Some("/unversioned"));
        assert_eq!(version_header(&response), Some("1"));
    }

    #[tokio::test]
    async fn test_catch_all_route_does_not_trigger_rewrite() {
        let mut table = routes();
        table.insert("/*rest", Operations::new().get("catchAll"));
        let stage = middleware(policy(), table);
        let mut state = RequestState::new();
        let req = request(Method::GET, "/unversioned", &[("api-version", "1")]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        // The candidate /v1/unversioned matches the catch-all, but that
        // template is not version-specific, so no rewrite happens.
        assert_eq!(routed_target(&response), Some("/unversioned"));
    }

    #[tokio::test]
    async fn test_query_string_preserved() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(
            Method::GET,
            "/versioned?test=1&name=a%20b",
            &[("api-version", "1")],
        );

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/v1/versioned?test=1&name=a%20b"));
    }

    #[tokio::test]
    async fn test_base_path_prefix() {
        let policy = VersionPolicy::builder()
            .valid_versions([1, 2])
            .default_version(1)
            .vendor_name("mysuperapi")
            .base_path("/api")
            .build()
            .unwrap();
        let mut table = RouteTable::new();
        table.insert("/api/v1/versioned", Operations::new().get("versionedV1"));
        let stage = middleware(policy, table);
        let mut state = RequestState::new();
        let req = request(Method::GET, "/api/versioned", &[]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/api/v1/versioned"));
        assert_eq!(version_header(&response), Some("1"));
    }

    #[tokio::test]
    async fn test_path_outside_base_is_untouched() {
        let policy = VersionPolicy::builder()
            .valid_versions([1])
            .default_version(1)
            .vendor_name("mysuperapi")
            .base_path("/api")
            .build()
            .unwrap();
        let stage = middleware(policy, routes());
        let mut state = RequestState::new();
        let req = request(Method::GET, "/users", &[]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/users"));
        assert_eq!(version_header(&response), Some("1"));
    }

    #[tokio::test]
    async fn test_templated_base_path_substitutes_first_segment() {
        let policy = VersionPolicy::builder()
            .valid_versions([1, 2])
            .default_version(1)
            .vendor_name("mysuperapi")
            .base_path("/{tenant}/")
            .build()
            .unwrap();
        let mut table = RouteTable::new();
        table.insert("/{tenant}/v1/users", Operations::new().get("tenantUsersV1"));
        let stage = middleware(policy, table);
        let mut state = RequestState::new();
        let req = request(Method::GET, "/acme/users", &[("api-version", "1")]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/acme/v1/users"));
        assert_eq!(version_header(&response), Some("1"));
    }

    #[tokio::test]
    async fn test_preflight_probes_with_requested_method() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(
            Method::OPTIONS,
            "/users",
            &[
                ("api-version", "2"),
                (headers::REQUEST_METHOD, "GET"),
            ],
        );

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/v2/users"));
        assert_eq!(version_header(&response), Some("2"));
    }

    #[tokio::test]
    async fn test_preflight_without_requested_method_is_rejected() {
        let stage = middleware(policy(), routes());
        let mut state = RequestState::new();
        let req = request(
            Method::OPTIONS,
            "/users",
            &[("api-version", "2"), (headers::REQUEST_METHOD, "")],
        );

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        // A version was resolved before the preflight check, so the fault
        // response is still annotated.
        assert_eq!(version_header(&response), Some("2"));
        assert_eq!(routed_target(&response), None);
    }

    #[tokio::test]
    async fn test_preflight_outside_base_path_is_still_rejected() {
        let policy = VersionPolicy::builder()
            .valid_versions([1, 2])
            .default_version(1)
            .vendor_name("mysuperapi")
            .base_path("/api")
            .build()
            .unwrap();
        let stage = middleware(policy, routes());
        let mut state = RequestState::new();
        let req = request(
            Method::OPTIONS,
            "/users",
            &[("api-version", "1"), (headers::REQUEST_METHOD, "")],
        );

        let response = stage.handle(&mut state, req, echo_handler()).await;

        // The path is outside the base, so no rewrite could ever apply,
        // but the preflight is malformed either way.
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(version_header(&response), Some("1"));
        assert_eq!(routed_target(&response), None);
    }

    #[tokio::test]
    async fn test_version_zero_is_a_valid_version() {
        let policy = VersionPolicy::builder()
            .valid_versions([0, 1])
            .default_version(1)
            .vendor_name("mysuperapi")
            .build()
            .unwrap();
        let mut table = RouteTable::new();
        table.insert("/v0/users", Operations::new().get("listUsersV0"));
        let stage = middleware(policy, table);
        let mut state = RequestState::new();
        let req = request(Method::GET, "/users", &[("api-version", "0")]);

        let response = stage.handle(&mut state, req, echo_handler()).await;

        assert_eq!(routed_target(&response), Some("/v0/users"));
        assert_eq!(version_header(&response), Some("0"));
    }

    #[test]
    fn test_name() {
        let stage = middleware(policy(), routes());
        assert_eq!(stage.name(), "versioning");
    }
}
