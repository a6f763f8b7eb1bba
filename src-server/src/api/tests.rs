//! Router tests
//!
//! The full `/api` router over an in-memory database, driven with `oneshot`.

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tower::ServiceExt;

    use crate::auth::UserProfile;
    use crate::config::{Config, IdentityConfig};
    use crate::domain::*;
    use crate::repository::Repository;
    use crate::{build_state, router, AppState};

    const TOKEN: &str = "test-access-token";

    struct Harness {
        app: Router,
        state: AppState,
        _research: tempfile::TempDir,
    }

    async fn harness() -> Harness {
        let research = tempfile::tempdir().unwrap();
        std::fs::write(research.path().join("togal-readme.md"), "# Togal\n[00:01] timeline\n").unwrap();
        std::fs::write(research.path().join("patrick-murphy-transcript.txt"), "[00:05] Hi\nthere\n").unwrap();

        let config = Config {
            database: PathBuf::from(":memory:"),
            research_dir: research.path().to_path_buf(),
            static_dir: research.path().join("dist"),
            identity: IdentityConfig {
                domain: "tenant.example.com".to_string(),
                client_id: "client-1".to_string(),
                client_secret: "secret".to_string(),
                audience: None,
            },
            ..Config::default()
        };
        let state = build_state(config).await.unwrap();
        let user = UserProfile {
            sub: "auth0|1".to_string(),
            name: Some("Pat".to_string()),
            email: Some("pat@example.com".to_string()),
            picture: None,
        };
        state.sessions.create(user, TOKEN.to_string(), None).await;

        Harness { app: router(state.clone()), state, _research: research }
    }

    fn request(method: &str, uri: &str, body: Option<Value>, authed: bool) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if authed {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn new_item(title: &str, party: &str, status: &str) -> Value {
        json!({
            "title": title,
            "description": "",
            "responsible_party": party,
            "target_date": "2026-02-01",
            "status": status,
            "priority": "high"
        })
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let h = harness().await;
        let (status, body) = send(&h.app, request("GET", "/api/health", None, false)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_data_requires_token() {
        let h = harness().await;
        let response = h.app.clone().oneshot(request("GET", "/api/action-items", None, false)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }

    #[tokio::test]
    async fn test_unknown_token_rejected() {
        let h = harness().await;
        let req = Request::builder()
            .uri("/api/metrics")
            .header(header::AUTHORIZATION, "Bearer nope")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&h.app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Unable to validate credentials");
    }

    #[tokio::test]
    async fn test_action_items_crud_and_filters() {
        let h = harness().await;
        for (title, party, status) in [
            ("Share drawings", "Client", "pending"),
            ("Tune parser", "Partner", "in_progress"),
            ("Review estimates", "Client", "in_progress"),
        ] {
            let (code, body) = send(&h.app, request("POST", "/api/action-items", Some(new_item(title, party, status)), true)).await;
            assert_eq!(code, StatusCode::OK);
            assert_eq!(body["created"], true);
        }

        let (_, all) = send(&h.app, request("GET", "/api/action-items/", None, true)).await;
        assert_eq!(all["total"], 3);

        let (_, filtered) = send(
            &h.app,
            request("GET", "/api/action-items?status=in_progress&responsible_party=Client", None, true),
        )
        .await;
        assert_eq!(filtered["total"], 1);
        assert_eq!(filtered["action_items"][0]["title"], "Review estimates");

        let (code, updated) =
            send(&h.app, request("PUT", "/api/action-items/1", Some(json!({"status": "completed"})), true)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(updated["action_item"]["status"], "completed");

        let (code, deleted) = send(&h.app, request("DELETE", "/api/action-items/1", None, true)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(deleted, json!({"id": 1, "deleted": true}));

        let (code, body) = send(&h.app, request("GET", "/api/action-items/1", None, true)).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Action item not found");
    }

    #[tokio::test]
    async fn test_bad_status_filter_is_400() {
        let h = harness().await;
        let (code, _) = send(&h.app, request("GET", "/api/action-items?status=done", None, true)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    async fn seed_deliverable(state: &AppState) -> Deliverable {
        state
            .repos
            .deliverables
            .create(&Deliverable {
                id: 0,
                name: "Parser benchmark".to_string(),
                description: String::new(),
                due_date: "2026-03-31".to_string(),
                owner: Owner::Partner,
                status: DeliverableStatus::InProgress,
                completion_percentage: 40.0,
                phase_id: 2,
                evidence: vec![],
                comments: None,
                updated_at: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_deliverables_grouped_and_month_validation() {
        let h = harness().await;
        seed_deliverable(&h.state).await;

        let (_, grouped) = send(&h.app, request("GET", "/api/deliverables", None, true)).await;
        assert_eq!(grouped["month1"].as_array().unwrap().len(), 0);
        assert_eq!(grouped["month2"].as_array().unwrap().len(), 1);
        assert!(grouped.get("month4").is_some());

        let (code, month) = send(&h.app, request("GET", "/api/deliverables/month/2", None, true)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(month["month"], 2);

        let (code, body) = send(&h.app, request("GET", "/api/deliverables/month/5", None, true)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Phase must be 1, 2, 3, or 4");
    }

    #[tokio::test]
    async fn test_deliverable_update_detects_stale_version() {
        let h = harness().await;
        let stored = seed_deliverable(&h.state).await;

        let stale = json!({
            "status": "REVIEW",
            "completion_percentage": 90,
            "comments": "",
            "expected_updated_at": "1999-01-01T00:00:00.000Z"
        });
        let (code, _) = send(&h.app, request("PUT", &format!("/api/deliverables/{}", stored.id), Some(stale), true)).await;
        assert_eq!(code, StatusCode::CONFLICT);

        let fresh = json!({
            "status": "REVIEW",
            "completion_percentage": 90,
            "comments": "Ready for sign-off",
            "expected_updated_at": stored.updated_at
        });
        let (code, body) = send(&h.app, request("PUT", &format!("/api/deliverables/{}", stored.id), Some(fresh), true)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["updated"], true);

        let reloaded = h.state.repos.deliverables.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, DeliverableStatus::Review);
        assert_eq!(reloaded.comments.as_deref(), Some("Ready for sign-off"));
    }

    #[tokio::test]
    async fn test_deliverable_percentage_out_of_range() {
        let h = harness().await;
        let stored = seed_deliverable(&h.state).await;
        let body = json!({"status": "IN_PROGRESS", "completion_percentage": 120});
        let (code, _) = send(&h.app, request("PUT", &format!("/api/deliverables/{}", stored.id), Some(body), true)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_updates_post_and_acknowledge() {
        let h = harness().await;
        let post = json!({
            "type": "MILESTONE",
            "title": "Phase 1 done",
            "content": "**Shipped**",
            "priority": "HIGH",
            "author_email": "lead@example.com"
        });
        let (code, created) = send(&h.app, request("POST", "/api/updates", Some(post), true)).await;
        assert_eq!(code, StatusCode::OK);
        let id = created["id"].as_u64().unwrap();

        let uri = format!("/api/updates/{}/acknowledge?user_email=pat@example.com", id);
        let (_, first) = send(&h.app, request("POST", &uri, None, true)).await;
        assert_eq!(first, json!({"update_id": id, "acknowledged": true, "user": "pat"}));

        let (_, second) = send(&h.app, request("POST", &uri, None, true)).await;
        assert_eq!(second["message"], "Already acknowledged");

        let (_, list) = send(&h.app, request("GET", "/api/updates?type_filter=MILESTONE", None, true)).await;
        assert_eq!(list["total"], 1);
        assert_eq!(list["updates"][0]["author"], "lead");
        assert_eq!(list["updates"][0]["acknowledgements"], json!(["pat"]));

        let (_, none) = send(&h.app, request("GET", "/api/updates?type_filter=BLOCKER", None, true)).await;
        assert_eq!(none["total"], 0);
    }

    #[tokio::test]
    async fn test_metrics_keyed_and_recorded() {
        let h = harness().await;
        h.state
            .repos
            .metrics
            .create(&Metric {
                id: 0,
                name: "Drawing Parsing Accuracy".to_string(),
                current: 80.0,
                target: 95.0,
                unit: "percent".to_string(),
                notes: "baseline".to_string(),
                updated_at: None,
            })
            .await
            .unwrap();

        let (_, metrics) = send(&h.app, request("GET", "/api/metrics", None, true)).await;
        assert_eq!(metrics["drawingParsingAccuracy"]["current"], 80.0);

        let (code, recorded) = send(
            &h.app,
            request("POST", "/api/metrics/1", Some(json!({"metric_id": 1, "value": 92.5, "notes": ""})), true),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(recorded["recorded"], true);
        assert_eq!(recorded["value"], 92.5);

        let (code, body) =
            send(&h.app, request("POST", "/api/metrics/42", Some(json!({"value": 1.0})), true)).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Metric ID 42 not found");
    }

    async fn seed_sample_project(state: &AppState, name: &str, method: &str, size_mb: f64, docs: u32) {
        let project: SampleProject = serde_json::from_value(json!({
            "id": 0,
            "name": name,
            "delivery_method": method,
            "type": "Commercial",
            "size_mb": size_mb,
            "description": "",
            "ai_value": "",
            "document_counts": {"total": docs},
            "key_features": [],
            "highlights": []
        }))
        .unwrap();
        state.repos.sample_projects.create(&project).await.unwrap();
    }

    #[tokio::test]
    async fn test_sample_projects_listing_and_filter() {
        let h = harness().await;
        seed_sample_project(&h.state, "Ambrose", "PLAN_SPEC_BID", 300.0, 40).await;
        seed_sample_project(&h.state, "Clinic", "DATA", 100.0, 10).await;

        let (code, body) = send(&h.app, request("GET", "/api/sample-projects", None, false)).await;
        assert_eq!(code, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Not authenticated");

        let (code, all) = send(&h.app, request("GET", "/api/sample-projects", None, true)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(all["total"], 2);
        assert_eq!(all["projects"][0]["name"], "Ambrose");
        assert_eq!(all["projects"][0]["type"], "Commercial");

        let (_, data) = send(&h.app, request("GET", "/api/sample-projects/?delivery_method=DATA", None, true)).await;
        assert_eq!(data["total"], 1);
        assert_eq!(data["projects"][0]["delivery_method"], "DATA");

        let (code, _) = send(&h.app, request("GET", "/api/sample-projects?delivery_method=BID", None, true)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sample_project_stats_and_detail() {
        let h = harness().await;
        seed_sample_project(&h.state, "Ambrose", "PLAN_SPEC_BID", 1024.0, 40).await;
        seed_sample_project(&h.state, "Garage", "PLAN_SPEC_BID", 1024.0, 2).await;

        let (code, stats) = send(&h.app, request("GET", "/api/sample-projects/stats", None, true)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(
            stats,
            json!({
                "total_projects": 2,
                "total_documents": 42,
                "total_size_mb": 2048.0,
                "total_size_gb": 2.0,
                "delivery_methods": {"PLAN_SPEC_BID": 2}
            })
        );

        let (code, project) = send(&h.app, request("GET", "/api/sample-projects/2", None, true)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(project["name"], "Garage");

        let (code, body) = send(&h.app, request("GET", "/api/sample-projects/42", None, true)).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Project ID 42 not found");
    }

    #[tokio::test]
    async fn test_research_documents() {
        let h = harness().await;

        let (code, doc) = send(&h.app, request("GET", "/api/research/togal-readme", None, false)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(doc, json!({"content": "# Togal\n[00:01] timeline\n", "filename": "togal-readme.md"}));

        let (_, transcript) = send(&h.app, request("GET", "/api/research/patrick-murphy-transcript", None, false)).await;
        assert_eq!(transcript["content"], "[00:05] Hi\n\nthere\n");

        let (code, body) = send(&h.app, request("GET", "/api/research/unknown", None, false)).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "File not found"}));

        let (code, body) = send(&h.app, request("GET", "/api/research/togal-initial-research", None, false)).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "File not found on filesystem"}));
    }

    #[tokio::test]
    async fn test_jerry_is_public() {
        let h = harness().await;
        let (code, body) = send(&h.app, request("GET", "/api/jerry", None, false)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["name"], "Jerry");
    }

    #[tokio::test]
    async fn test_login_redirects_to_provider() {
        let h = harness().await;
        let response = h
            .app
            .clone()
            .oneshot(request("GET", "/api/auth/login?organization=acme", None, false))
            .await
            .unwrap();
        assert!(response.status().is_redirection());
        let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.starts_with("https://tenant.example.com/authorize?"));
        assert!(location.contains("organization=acme"));
        assert!(location.contains("client_id=client%2D1"));
    }

    #[tokio::test]
    async fn test_token_without_cookie_is_401() {
        let h = harness().await;
        let (code, _) = send(&h.app, request("GET", "/api/auth/token", None, false)).await;
        assert_eq!(code, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_callback_rejects_unknown_state() {
        let h = harness().await;
        let (code, _) = send(&h.app, request("GET", "/api/auth/callback?code=abc&state=forged", None, false)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_404() {
        let h = harness().await;
        let (code, body) = send(&h.app, request("GET", "/api/nothing-here", None, false)).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Not Found"}));
    }
}
