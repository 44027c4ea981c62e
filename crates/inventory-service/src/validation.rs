//! Request body validation applied at the handler boundary.
//!
//! Input shapes are structs deriving `Deserialize` and `Validate`. Any property
//! the shape does not declare is rejected, whether or not the struct carries
//! `#[serde(deny_unknown_fields)]`. Declared properties are converted into their
//! target types during deserialization and then checked against their
//! `#[validate(...)]` rules. Every failure becomes a `400 Bad Request` and the
//! handler never runs.

use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::ApiError;

/// JSON body extractor enforcing the whitelist validation policy
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let value = deserialize_whitelisted::<T>(body)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Deserialize `body` into `T`, rejecting every property `T` does not declare
fn deserialize_whitelisted<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let mut undeclared = Vec::new();
    let value = serde_ignored::deserialize(body, |path| {
        undeclared.push(format!("property {} should not exist", path));
    })
    .map_err(|e| {
        ApiError::BadRequest(format!(
            "Failed to deserialize the JSON body into the target type: {}",
            e
        ))
    })?;

    if !undeclared.is_empty() {
        undeclared.sort();
        return Err(ApiError::Validation(undeclared));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorBody;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use serde::Deserialize;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(deny_unknown_fields)]
    struct NewItem {
        #[validate(length(min = 1, message = "name should not be empty"))]
        name: String,
        #[validate(range(min = 0, message = "quantity must not be negative"))]
        quantity: i64,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Restock {
        #[validate(length(min = 1, message = "sku should not be empty"))]
        sku: String,
        #[validate(nested)]
        location: Location,
        #[validate(nested)]
        #[serde(default)]
        lines: Vec<Line>,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Location {
        #[validate(length(min = 1, message = "aisle should not be empty"))]
        aisle: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Line {
        #[validate(range(min = 1, message = "qty must be positive"))]
        qty: i64,
    }

    fn restock_app(calls: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/restock",
            post(move |ValidatedJson(restock): ValidatedJson<Restock>| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                format!("{}:{}:{}", restock.sku, restock.location.aisle, restock.lines.len())
            }),
        )
    }

    fn restock_request(body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(Method::POST)
            .uri("/restock")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn test_app(calls: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/items",
            post(move |ValidatedJson(item): ValidatedJson<NewItem>| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                format!("{}:{}:{}", item.name, item.quantity, item.tags.len())
            }),
        )
    }

    fn json_request(body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(Method::POST)
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_error(response: axum::response::Response) -> ErrorBody {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_reaches_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = test_app(Arc::clone(&calls));

        let response = app
            .oneshot(json_request(r#"{"name": "bolt", "quantity": 12}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"bolt:12:0");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_field_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = test_app(Arc::clone(&calls));

        let response = app
            .oneshot(json_request(
                r#"{"name": "bolt", "quantity": 12, "price": 3}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_error(response).await;
        assert_eq!(body.status_code, 400);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message.len(), 1);
        assert!(body.message[0].contains("unknown field `price`"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mistyped_field_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = test_app(Arc::clone(&calls));

        let response = app
            .oneshot(json_request(r#"{"name": "bolt", "quantity": "many"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rule_violations_reported_per_field() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = test_app(Arc::clone(&calls));

        let response = app
            .oneshot(json_request(r#"{"name": "", "quantity": -4}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_error(response).await;
        assert_eq!(
            body.message,
            vec![
                "name should not be empty".to_string(),
                "quantity must not be negative".to_string(),
            ]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = test_app(Arc::clone(&calls));

        let response = app
            .oneshot(json_request(r#"{"name": "bolt", "#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_content_type_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = test_app(Arc::clone(&calls));

        let req = HttpRequest::builder()
            .method(Method::POST)
            .uri("/items")
            .body(Body::from(r#"{"name": "bolt", "quantity": 1}"#))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_undeclared_property_rejected_without_serde_attribute() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = restock_app(Arc::clone(&calls));

        let response = app
            .oneshot(restock_request(
                r#"{"sku": "B-12", "location": {"aisle": "4"}, "price": 3}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_error(response).await;
        assert_eq!(body.message, vec!["property price should not exist".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_undeclared_nested_property_reports_path() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = restock_app(Arc::clone(&calls));

        let response = app
            .oneshot(restock_request(
                r#"{"sku": "B-12", "location": {"aisle": "4", "shelf": 2}, "note": "x"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_error(response).await;
        assert_eq!(
            body.message,
            vec![
                "property location.shelf should not exist".to_string(),
                "property note should not exist".to_string(),
            ]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_declared_properties_without_serde_attribute_accepted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = restock_app(Arc::clone(&calls));

        let response = app
            .oneshot(restock_request(
                r#"{"sku": "B-12", "location": {"aisle": "4"}, "lines": [{"qty": 2}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"B-12:4:1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_nested_rule_violations_report_path() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = restock_app(Arc::clone(&calls));

        let response = app
            .oneshot(restock_request(
                r#"{"sku": "", "location": {"aisle": ""}, "lines": [{"qty": 3}, {"qty": 0}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_error(response).await;
        assert_eq!(
            body.message,
            vec![
                "lines[1].qty: qty must be positive".to_string(),
                "location.aisle: aisle should not be empty".to_string(),
                "sku should not be empty".to_string(),
            ]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
