//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/visibility", post(visibility_handler))
        .route("/focus-time", get(focus_time_handler))
        .route("/status", get(status_handler))
        .route("/notifications", get(notifications_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{controller::SessionSettings, tasks::SessionLoop};

    fn test_router() -> (Router, Arc<AppState>) {
        let settings = SessionSettings {
            tick_period: std::time::Duration::from_secs(3600),
            ..SessionSettings::default()
        };
        let (session_loop, channels) = SessionLoop::new(&settings);
        tokio::spawn(session_loop.run());

        let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), channels));
        (create_router(Arc::clone(&state)), state)
    }

    async fn call(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        match body {
            Some(json) => {
                let body = json.to_string();
                call_raw(router, method, uri, Some("application/json"), &body).await
            }
            None => call_raw(router, method, uri, None, "").await,
        }
    }

    async fn call_raw(
        router: &Router,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let body = Body::from(body.to_string());

        let response = router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_start_then_conflict() {
        let (router, state) = test_router();

        let (status, body) = call(
            &router,
            Method::POST,
            "/start",
            Some(json!({"focus_minutes": 50, "break_minutes": "10", "sessions": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["session"]["phase"]["phase"], "focus");
        assert_eq!(body["session"]["timer"]["focus_duration_seconds"], 3000);
        assert_eq!(body["session"]["timer"]["break_duration_seconds"], 600);

        let (status, body) = call(&router, Method::POST, "/start", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Pomodoro is already running.");

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_start_without_body_uses_defaults() {
        let (router, state) = test_router();

        let (status, body) = call(&router, Method::POST, "/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["timer"]["focus_duration_seconds"], 25 * 60);
        assert_eq!(body["session"]["timer"]["total_sessions"], 4);

        let (_, status_body) = call(&router, Method::GET, "/status", None).await;
        assert_eq!(status_body["status_line"]["text"], "pomodoro 1/4 - focus: 25:00");
        assert_eq!(status_body["last_action"], "start");

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_start_without_content_type_is_rejected() {
        let (router, state) = test_router();

        let body = r#"{"focus_minutes": 50, "sessions": 2}"#;
        let (status, response) = call_raw(&router, Method::POST, "/start", None, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["status"], "error");
        assert!(response["message"].as_str().unwrap().contains("Content-Type"));
        assert_eq!(response["session"]["phase"]["phase"], "idle");
        assert!(!state.get_snapshot().timer.is_running);

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_start_with_invalid_json_is_rejected() {
        let (router, state) = test_router();

        let body = r#"{"focus_minutes": 50,}"#;
        let content_type = Some("application/json");
        let (status, response) =
            call_raw(&router, Method::POST, "/start", content_type, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["status"], "error");
        assert!(!response["message"].as_str().unwrap().is_empty());
        assert!(!state.get_snapshot().timer.is_running);

        let (status, _) = call_raw(&router, Method::POST, "/start", content_type, "true").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!state.get_snapshot().timer.is_running);

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_start_with_json_suffix_content_type() {
        let (router, state) = test_router();

        let body = r#"{"sessions": 2}"#;
        let content_type = Some("application/vnd.pomodoro+json; charset=utf-8");
        let (status, response) =
            call_raw(&router, Method::POST, "/start", content_type, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["session"]["timer"]["total_sessions"], 2);

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_visibility_pauses_and_resumes() {
        let (router, state) = test_router();
        call(&router, Method::POST, "/start", None).await;

        let blur = Some(json!({"focused": false}));
        let (status, body) = call(&router, Method::POST, "/visibility", blur).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "paused");
        assert_eq!(body["session"]["ticking"], false);

        let focus = Some(json!({"focused": true}));
        let (_, body) = call(&router, Method::POST, "/visibility", focus).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["session"]["ticking"], true);

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_focus_time_and_notifications() {
        let (router, state) = test_router();

        let (status, body) = call(&router, Method::GET, "/focus-time", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "0h 0m 0s");
        assert_eq!(body["total_seconds"], 0);

        let answers = Some(json!({"focus_minutes": "abc"}));
        call(&router, Method::POST, "/start", answers).await;
        let (_, body) = call(&router, Method::GET, "/notifications", None).await;
        let messages: Vec<&str> = body["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["message"].as_str().unwrap())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Today's focus time: 0h 0m 0s",
                "'abc' is not a valid focus time, using 25",
            ]
        );

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_health() {
        let (router, state) = test_router();
        let (status, body) = call(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        state.shutdown().await.unwrap();
    }
}
