// Webhook ingestion HTTP route

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use gitviz_core::{signature, EventKind, WebhookError};
use gitviz_storage::EventStore;
use std::sync::Arc;
use uuid::Uuid;

use crate::common::EventAccepted;
use crate::services::EventService;

/// App state for the webhook route
#[derive(Clone)]
pub struct AppState {
    pub event_service: Arc<EventService>,
    pub hub_secret: String,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, hub_secret: String) -> Self {
        Self {
            event_service: Arc::new(EventService::new(store)),
            hub_secret,
        }
    }
}

/// Create webhook routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/event", post(receive_event))
        .with_state(state)
}

/// POST /event - Receive a signed GitHub webhook delivery
///
/// Validation order: signature, then event type, then payload. The body is
/// taken as raw bytes because the signature covers the exact bytes GitHub
/// sent, not a reserialization.
#[utoipa::path(
    post,
    path = "/event",
    request_body(content = serde_json::Value, description = "GitHub webhook payload for the event type named in X-GitHub-Event"),
    responses(
        (status = 201, description = "Event accepted; record created or updated", body = EventAccepted),
        (status = 400, description = "Payload does not match the event type's schema"),
        (status = 403, description = "Missing or invalid X-Hub-Signature"),
        (status = 501, description = "Event type has no registered handler"),
        (status = 500, description = "Internal server error")
    ),
    tag = "webhook"
)]
pub async fn receive_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<EventAccepted>), StatusCode> {
    // Nothing else in the request is trusted until the HMAC checks out
    let sig = header_str(&headers, "x-hub-signature");
    if !signature::verify(&state.hub_secret, &body, sig) {
        tracing::warn!("delivery rejected: signature missing or invalid");
        return Err(StatusCode::FORBIDDEN);
    }

    let event_name = header_str(&headers, "x-github-event");
    let Some(kind) = EventKind::parse(event_name) else {
        tracing::warn!(event = %event_name, "delivery rejected: no handler for event type");
        return Err(StatusCode::NOT_IMPLEMENTED);
    };

    // GitHub sends a fresh UUID per delivery attempt; fall back to a local
    // one if the header is absent or malformed
    let delivery_id = header_str(&headers, "x-github-delivery")
        .parse::<Uuid>()
        .unwrap_or_else(|_| Uuid::new_v4());

    let accepted = state
        .event_service
        .ingest(kind, delivery_id, &body)
        .await
        .map_err(|e| match e {
            WebhookError::Payload(msg) => {
                tracing::warn!(event = %kind, error = %msg, "delivery rejected: malformed payload");
                StatusCode::BAD_REQUEST
            }
            other => {
                tracing::error!(event = %kind, "failed to store event: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    tracing::info!(
        event = %kind,
        delivery = %delivery_id,
        status = %accepted.status,
        deliveries = accepted.deliveries,
        "delivery accepted"
    );

    Ok((StatusCode::CREATED, Json(accepted)))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use gitviz_storage::InMemoryEventStore;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const SECRET: &str = "test-secret";

    const PING: &str = r#"{ "zen": "Keep it logically awesome.", "hook_id": 1 }"#;

    const PUSH_NO_COMMITS: &str = r#"{
        "ref": "refs/heads/main",
        "before": "aaa111",
        "after": "bbb222",
        "commits": [],
        "repository": { "name": "gitviz", "full_name": "octocat/gitviz" },
        "pusher": { "name": "octocat" },
        "sender": { "login": "octocat" }
    }"#;

    fn push_with_commit(files_field: &str) -> String {
        format!(
            r#"{{
                "ref": "refs/heads/main",
                "before": "aaa111",
                "after": "ccc333",
                "commits": [{{ "id": "ccc333", "message": "change files", {files_field} }}],
                "repository": {{ "name": "gitviz", "full_name": "octocat/gitviz" }},
                "pusher": {{ "name": "octocat" }},
                "sender": {{ "login": "octocat" }}
            }}"#
        )
    }

    const CREATE_BRANCH: &str = r#"{
        "ref": "feature/viz",
        "ref_type": "branch",
        "repository": { "name": "gitviz", "full_name": "octocat/gitviz" },
        "sender": { "login": "octocat" }
    }"#;

    fn test_app(store: Arc<InMemoryEventStore>) -> Router {
        routes(AppState::new(store, SECRET.to_string()))
    }

    fn request(event: &str, body: &str, sig: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/event")
            .header("content-type", "application/json")
            .header("user-agent", "GitHub-Hookshot/e4028f5")
            .header("x-github-event", event)
            .header("x-github-delivery", Uuid::new_v4().to_string())
            .header("x-hub-signature", sig)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn signed_request(event: &str, body: &str) -> Request<Body> {
        request(event, body, &signature::compute(SECRET, body.as_bytes()))
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn empty_signature_is_403() {
        let app = test_app(Arc::new(InMemoryEventStore::new()));
        let response = app.oneshot(request("ping", PING, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn absent_signature_header_is_403() {
        let app = test_app(Arc::new(InMemoryEventStore::new()));
        let req = Request::builder()
            .method("POST")
            .uri("/event")
            .header("content-type", "application/json")
            .header("x-github-event", "ping")
            .header("x-github-delivery", Uuid::new_v4().to_string())
            .body(Body::from(PING))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn wrong_secret_is_403() {
        let store = Arc::new(InMemoryEventStore::new());
        let app = test_app(store.clone());
        let sig = signature::compute("bad secret", PING.as_bytes());
        let response = app.oneshot(request("ping", PING, &sig)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unimplemented_event_type_is_501() {
        let app = test_app(Arc::new(InMemoryEventStore::new()));
        // gollum is valid GitHub vocabulary but has no handler here
        let response = app.oneshot(signed_request("gollum", PING)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn invalid_event_type_is_501() {
        let app = test_app(Arc::new(InMemoryEventStore::new()));
        let response = app
            .oneshot(signed_request("this is totally made up", PING))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn create_branch_event_is_201() {
        let app = test_app(Arc::new(InMemoryEventStore::new()));
        let response = app
            .oneshot(signed_request("create", CREATE_BRANCH))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = response_json(response).await;
        assert_eq!(body["status"], "created");
    }

    #[tokio::test]
    async fn push_with_no_commits_is_201() {
        let app = test_app(Arc::new(InMemoryEventStore::new()));
        let response = app
            .oneshot(signed_request("push", PUSH_NO_COMMITS))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn push_with_added_file_is_201() {
        let app = test_app(Arc::new(InMemoryEventStore::new()));
        let body = push_with_commit(r#""added": ["README.md"]"#);
        let response = app.oneshot(signed_request("push", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn push_with_modified_file_is_201() {
        let app = test_app(Arc::new(InMemoryEventStore::new()));
        let body = push_with_commit(r#""modified": ["README.md"]"#);
        let response = app.oneshot(signed_request("push", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn push_with_removed_file_is_201() {
        let app = test_app(Arc::new(InMemoryEventStore::new()));
        let body = push_with_commit(r#""removed": ["OLD.md"]"#);
        let response = app.oneshot(signed_request("push", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn redelivery_updates_the_existing_event() {
        let store = Arc::new(InMemoryEventStore::new());
        let app = test_app(store.clone());

        // each delivery attempt carries a fresh delivery UUID
        let first = app
            .clone()
            .oneshot(signed_request("push", PUSH_NO_COMMITS))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let first_body = response_json(first).await;
        assert_eq!(first_body["status"], "created");
        assert_eq!(first_body["deliveries"], 1);

        let second = app
            .oneshot(signed_request("push", PUSH_NO_COMMITS))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CREATED);
        let second_body = response_json(second).await;
        assert_eq!(second_body["status"], "updated");
        assert_eq!(second_body["deliveries"], 2);
        assert_eq!(second_body["id"], first_body["id"]);

        // one logical event, one row
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn malformed_payload_for_known_kind_is_400() {
        let store = Arc::new(InMemoryEventStore::new());
        let app = test_app(store.clone());
        let body = r#"{ "ref": 1 }"#;
        let response = app.oneshot(signed_request("push", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.is_empty().await);
    }
}
