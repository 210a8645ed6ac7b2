//! Document API integration tests
//!
//! Requests go through the full router, so extractors, error responses and
//! the broadcast side effects are all exercised together.

#[cfg(feature = "ssr")]
mod common;

#[cfg(feature = "ssr")]
mod tests {
    use super::common::{json, send, test_app};
    use axum::http::{Method, StatusCode};
    use pretty_assertions::assert_eq;
    use xfdocs::shared::{BroadcastMessage, Document};

    #[tokio::test]
    async fn test_create_edit_show_scenario() {
        let (app, state) = test_app();
        let mut subscription = state.channel.subscribe();

        let (status, body) = send(&app, Method::POST, "/docs", Some(r#"{"title":"Notes"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let created: Document = serde_json::from_str(&body).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.title, "Notes");
        assert_eq!(created.body, "");

        let (status, body) = send(&app, Method::GET, "/docs", None).await;
        assert_eq!(status, StatusCode::OK);
        let listed: Vec<Document> = serde_json::from_str(&body).unwrap();
        assert_eq!(listed, vec![created.clone()]);

        let (status, body) = send(
            &app,
            Method::PUT,
            "/docs",
            Some(r#"{"id":1,"body":"hello"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "");

        assert_eq!(subscription.recv().await, Some(BroadcastMessage::new(1, "hello")));
        assert_eq!(subscription.try_recv(), None);

        let (status, body) = send(&app, Method::GET, "/docs/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let shown: Document = serde_json::from_str(&body).unwrap();
        assert_eq!(shown.title, "Notes");
        assert_eq!(shown.body, "hello");
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_list_keeps_creation_order() {
        let (app, _state) = test_app();
        for title in ["a", "b", "c"] {
            let payload = format!(r#"{{"title":"{}"}}"#, title);
            send(&app, Method::POST, "/docs", Some(&payload)).await;
        }

        let (_, body) = send(&app, Method::GET, "/docs", None).await;
        let listed: Vec<Document> = serde_json::from_str(&body).unwrap();
        let summary: Vec<(i64, &str)> = listed.iter().map(|d| (d.id, d.title.as_str())).collect();
        assert_eq!(summary, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[tokio::test]
    async fn test_put_with_id_returns_stored_document() {
        let (app, state) = test_app();
        send(&app, Method::POST, "/docs", Some(r#"{"title":"Notes"}"#)).await;
        let mut subscription = state.channel.subscribe();

        let (status, body) = send(&app, Method::PUT, "/docs/1", Some(r#"{"body":"v2"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let updated: Document = serde_json::from_str(&body).unwrap();
        assert_eq!(updated.body, "v2");
        assert_eq!(updated.title, "Notes");

        assert_eq!(subscription.recv().await, Some(BroadcastMessage::new(1, "v2")));
    }

    #[tokio::test]
    async fn test_edit_to_empty_body_is_broadcast() {
        let (app, state) = test_app();
        send(&app, Method::POST, "/docs", Some(r#"{"title":"Notes"}"#)).await;
        send(&app, Method::PUT, "/docs", Some(r#"{"id":1,"body":"x"}"#)).await;
        let mut subscription = state.channel.subscribe();

        let (status, _) = send(&app, Method::PUT, "/docs", Some(r#"{"id":1,"body":""}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(subscription.recv().await, Some(BroadcastMessage::new(1, "")));
    }

    #[tokio::test]
    async fn test_unknown_id_is_404_and_not_broadcast() {
        let (app, state) = test_app();
        let mut subscription = state.channel.subscribe();

        let (status, body) = send(&app, Method::GET, "/docs/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["status"], 404);

        let (status, _) = send(&app, Method::PUT, "/docs", Some(r#"{"id":99,"body":"x"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::PUT, "/docs/99", Some(r#"{"body":"x"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert_eq!(subscription.try_recv(), None);
    }

    #[tokio::test]
    async fn test_blank_or_missing_title_is_422() {
        let (app, _state) = test_app();

        for payload in [r#"{"title":"   "}"#, r#"{"title":""}"#, r#"{}"#] {
            let (status, body) = send(&app, Method::POST, "/docs", Some(payload)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "payload {}", payload);
            assert!(json(&body)["error"].as_str().unwrap().contains("title"));
        }

        let (_, body) = send(&app, Method::GET, "/docs", None).await;
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn test_missing_edit_fields_are_422() {
        let (app, state) = test_app();
        send(&app, Method::POST, "/docs", Some(r#"{"title":"Notes"}"#)).await;
        let mut subscription = state.channel.subscribe();

        let (status, _) = send(&app, Method::PUT, "/docs", Some(r#"{"body":"x"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(&app, Method::PUT, "/docs", Some(r#"{"id":1}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(subscription.try_recv(), None);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (app, _state) = test_app();

        let (status, body) = send(&app, Method::POST, "/docs", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["status"], 400);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_rejected() {
        let (app, _state) = test_app();
        let (status, _) = send(&app, Method::GET, "/docs/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_and_fallback() {
        let (app, _state) = test_app();

        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/cable"));

        let (status, _) = send(&app, Method::GET, "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cable_rejects_bad_filter() {
        let (app, _state) = test_app();
        let (status, _) = send(&app, Method::GET, "/cable?doc=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
