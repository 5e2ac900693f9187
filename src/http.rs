//! HTTP hosting layer.
//!
//! Turns the route tables published by an [`ApiSystem`]'s endpoints into an axum
//! [`Router`]. This is the only module that knows about HTTP: it parses path tokens,
//! query strings and JSON bodies into a [`RouteRequest`], and maps
//! [`FrameworkError`] onto status codes with a `{"detail": ...}` body.
//!
//! Collection and detail paths are served both with and without a trailing slash.

use crate::framework::{
    EndpointDescriptor, FrameworkError, Method, Operation, ResourceEndpoint, RouteRequest,
    IDENTIFIER_PARAM,
};
use crate::lifecycle::ApiSystem;
use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodFilter, MethodRouter};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

type QueryPairs = Query<Vec<(String, String)>>;

impl IntoResponse for FrameworkError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Endpoint index served at `/` and `/all-endpoints`.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointIndex {
    pub count: usize,
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Build the HTTP router for every endpoint registered in `system`.
pub fn build_router(system: &ApiSystem) -> Router {
    let index = Arc::new(EndpointIndex {
        count: system.endpoints().len(),
        endpoints: system.descriptors(),
    });

    let index_handler = move || {
        let index = index.clone();
        async move { Json((*index).clone()) }
    };

    let mut router = Router::new()
        .route("/", get(index_handler.clone()))
        .route("/all-endpoints", get(index_handler));

    for endpoint in system.endpoints() {
        for (path, methods) in resource_method_routers(endpoint) {
            let slashed = format!("{path}/");
            router = router.route(&path, methods.clone()).route(&slashed, methods);
        }
    }

    router.fallback(|| async { FrameworkError::NotFound("Not Found".into()) })
}

/// One method router per distinct path, in route-table order.
///
/// A literal path beside the detail route (`/users/regenerate`) shadows it in the
/// router, so it also answers the detail methods it does not declare itself, with
/// its last segment as the identifier token.
fn resource_method_routers(endpoint: &Arc<dyn ResourceEndpoint>) -> Vec<(String, MethodRouter)> {
    let mut grouped: Vec<(String, Vec<(Method, Operation)>)> = Vec::new();
    for route in endpoint.descriptor().routes {
        match grouped.iter_mut().find(|(path, _)| *path == route.path) {
            Some((_, operations)) => operations.push((route.method, route.operation)),
            None => grouped.push((route.path, vec![(route.method, route.operation)])),
        }
    }

    let detail = grouped
        .iter()
        .find(|(path, _)| path.ends_with(&format!("{{{IDENTIFIER_PARAM}}}")))
        .map(|(path, operations)| (parent(path).to_string(), operations.clone()));
    if let Some((detail_parent, detail_operations)) = detail {
        for (path, operations) in grouped.iter_mut() {
            if path.contains('{') || parent(path) != detail_parent {
                continue;
            }
            for (method, operation) in &detail_operations {
                if !operations.iter().any(|(m, _)| m == method) {
                    operations.push((*method, *operation));
                }
            }
        }
    }

    grouped
        .into_iter()
        .map(|(path, operations)| {
            let methods = operations
                .into_iter()
                .fold(MethodRouter::new(), |methods, (method, operation)| {
                    on(methods, endpoint.clone(), &path, method, operation)
                });
            (path, methods)
        })
        .collect()
}

fn parent(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

fn on(
    methods: MethodRouter,
    endpoint: Arc<dyn ResourceEndpoint>,
    path: &str,
    method: Method,
    operation: Operation,
) -> MethodRouter {
    let filter = match method {
        Method::Get => MethodFilter::GET,
        Method::Post => MethodFilter::POST,
        Method::Put => MethodFilter::PUT,
        Method::Patch => MethodFilter::PATCH,
    };

    if !operation.is_detail() {
        return methods.on(
            filter,
            move |Query(query): QueryPairs, body: Bytes| async move {
                let request = RouteRequest {
                    token: None,
                    query,
                    body: parse_body(&body)?,
                };
                dispatch(endpoint, operation, request).await
            },
        );
    }

    if path.contains('{') {
        methods.on(
            filter,
            move |Path(token): Path<String>, Query(query): QueryPairs, body: Bytes| async move {
                let request = RouteRequest {
                    token: Some(token),
                    query,
                    body: parse_body(&body)?,
                };
                dispatch(endpoint, operation, request).await
            },
        )
    } else {
        let token = path.rsplit('/').next().unwrap_or_default().to_string();
        methods.on(
            filter,
            move |Query(query): QueryPairs, body: Bytes| async move {
                let request = RouteRequest {
                    token: Some(token),
                    query,
                    body: parse_body(&body)?,
                };
                dispatch(endpoint, operation, request).await
            },
        )
    }
}

async fn dispatch(
    endpoint: Arc<dyn ResourceEndpoint>,
    operation: Operation,
    request: RouteRequest,
) -> Result<Json<Value>, FrameworkError> {
    debug!(?operation, token = ?request.token, "Dispatch");
    endpoint.handle(operation, request).await.map(Json)
}

/// Empty bodies are absent; anything else must be JSON.
fn parse_body(body: &Bytes) -> Result<Option<Value>, FrameworkError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| FrameworkError::ValidationError(format!("Invalid JSON body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_absent() {
        assert_eq!(parse_body(&Bytes::from_static(b"")).unwrap(), None);
        assert_eq!(parse_body(&Bytes::from_static(b"  \n")).unwrap(), None);
        assert_eq!(
            parse_body(&Bytes::from_static(br#"{"a": 1}"#)).unwrap(),
            Some(json!({"a": 1}))
        );
        assert!(parse_body(&Bytes::from_static(b"{nope")).is_err());
    }

    #[test]
    fn errors_map_to_status_codes() {
        let response = FrameworkError::NotFound("User not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = FrameworkError::ServiceUnavailable("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let response = FrameworkError::AmbiguousResult("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn every_route_is_mounted_once_per_path() {
        let system = ApiSystem::new(16, Default::default()).unwrap();
        let users = &system.endpoints()[0];
        let paths: Vec<String> = resource_method_routers(users)
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(
            paths,
            vec!["/users", "/users/regenerate", "/users/{id_or_uuid}"]
        );
        let _router = build_router(&system);
    }

    #[test]
    fn literal_siblings_share_the_detail_parent() {
        assert_eq!(parent("/users/regenerate"), "/users");
        assert_eq!(parent("/users/{id_or_uuid}"), "/users");
        assert_eq!(parent("/users"), "");
    }
}
