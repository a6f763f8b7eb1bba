use futures::executor::block_on;
use std::cell::RefCell;
use std::collections::VecDeque;

use super::*;
use crate::models::{ActionStatus, DeliverableStatus, DeliverableProgress, UpdateType};

/// Records every request and answers from a queue.
#[derive(Default)]
struct FakeTransport {
    sent: RefCell<Vec<HttpRequest>>,
    replies: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
}

impl FakeTransport {
    fn reply(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_string() }));
        self
    }

    fn fail(self, err: ApiError) -> Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    fn with_token(self) -> Self {
        self.reply(200, r#"{"accessToken":"tok-1"}"#)
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no reply queued".to_string())))
    }
}

fn client(transport: FakeTransport) -> ApiClient<FakeTransport> {
    ApiClient::new(transport, &PortalConfig::from_values(Some("http://api.test"), None))
}

#[test]
fn test_fetch_attaches_bearer_and_base_url() {
    let api = client(FakeTransport::default().with_token().reply(200, "{}"));
    let response = block_on(api.authenticated_fetch("/api/metrics/", RequestOptions::default())).unwrap();
    assert_eq!(response.status, 200);

    let sent = api.transport.sent.borrow();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].url, TOKEN_PATH);
    assert_eq!(sent[1].url, "http://api.test/api/metrics/");
    assert_eq!(sent[1].header("authorization"), Some("Bearer tok-1"));
    assert_eq!(sent[1].header("Content-Type"), Some("application/json"));
}

#[test]
fn test_no_token_means_no_backend_request() {
    let api = client(FakeTransport::default().reply(401, r#"{"detail":"Not authenticated"}"#));
    let result = block_on(api.authenticated_fetch("/api/action-items", RequestOptions::default()));

    assert_eq!(result, Err(ApiError::Unauthenticated));
    assert_eq!(api.transport.sent.borrow().len(), 1);
}

#[test]
fn test_token_network_failure_is_unauthenticated() {
    let api = client(FakeTransport::default().fail(ApiError::Network("offline".to_string())));
    assert_eq!(block_on(api.access_token()), Err(ApiError::Unauthenticated));
}

#[test]
fn test_empty_token_is_unauthenticated() {
    let api = client(FakeTransport::default().reply(200, r#"{"accessToken":""}"#));
    assert_eq!(block_on(api.access_token()), Err(ApiError::Unauthenticated));
}

#[test]
fn test_caller_headers_win() {
    let api = client(FakeTransport::default().with_token().reply(200, "ok"));
    let options = RequestOptions::method(Method::Post).with_header("content-type", "text/plain");
    block_on(api.authenticated_fetch("/x", options)).unwrap();

    let sent = api.transport.sent.borrow();
    let content_types: Vec<_> = sent[1].headers.iter().filter(|(k, _)| k.eq_ignore_ascii_case("content-type")).collect();
    assert_eq!(content_types.len(), 1);
    assert_eq!(content_types[0].1, "text/plain");
    assert_eq!(sent[1].method, Method::Post);
}

#[test]
fn test_non_ok_status_is_returned_raw() {
    let api = client(FakeTransport::default().with_token().reply(500, "boom"));
    let response = block_on(api.authenticated_fetch("/x", RequestOptions::default())).unwrap();
    assert!(!response.is_ok());
}

#[test]
fn test_get_json_maps_status_error() {
    let api = client(FakeTransport::default().with_token().reply(404, r#"{"detail":"Action item not found"}"#));
    let err = block_on(api.get_json::<serde_json::Value>("/api/action-items/9")).unwrap_err();
    assert_eq!(err.to_string(), "API returned 404: Action item not found");
}

#[test]
fn test_list_action_items_sends_combined_filters() {
    let api = client(FakeTransport::default().with_token().reply(200, r#"{"action_items":[],"total":0}"#));
    let items = block_on(api.list_action_items(Some(&ActionStatus::InProgress), Some("Client Team"))).unwrap();
    assert!(items.is_empty());

    let sent = api.transport.sent.borrow();
    assert_eq!(sent[1].url, "http://api.test/api/action-items?status=in%5Fprogress&responsible_party=Client%20Team");
}

#[test]
fn test_paths() {
    assert_eq!(action_items_path(None, Some("")), "/api/action-items");
    assert_eq!(updates_path(Some(&UpdateType::Milestone)), "/api/updates?type_filter=MILESTONE");
    assert_eq!(updates_path(None), "/api/updates");
}

#[test]
fn test_update_deliverable_conflict() {
    let api = client(FakeTransport::default().with_token().reply(409, r#"{"detail":"Record was modified"}"#));
    let progress = DeliverableProgress {
        status: DeliverableStatus::Review,
        completion_percentage: 80.0,
        blockers: vec![],
        comments: String::new(),
        expected_updated_at: Some("t0".to_string()),
    };
    let err = block_on(api.update_deliverable(3, &progress)).unwrap_err();
    assert!(err.is_conflict());

    let sent = api.transport.sent.borrow();
    assert_eq!(sent[1].method, Method::Put);
    let body: serde_json::Value = serde_json::from_str(sent[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["status"], "REVIEW");
    assert_eq!(body["expected_updated_at"], "t0");
}

#[test]
fn test_list_metrics_orders_by_id() {
    let body = r#"{
        "a": {"id": 2, "name": "B", "current": 1, "target": 2, "unit": "count", "notes": "", "updated_at": null},
        "b": {"id": 1, "name": "A", "current": 1, "target": 2, "unit": "count", "notes": "", "updated_at": null}
    }"#;
    let api = client(FakeTransport::default().with_token().reply(200, body));
    let metrics = block_on(api.list_metrics()).unwrap();
    assert_eq!(metrics.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_current_user_signed_out() {
    let api = client(FakeTransport::default().reply(401, ""));
    assert_eq!(block_on(api.current_user()), Err(ApiError::Unauthenticated));
}

#[test]
fn test_research_document_is_unauthenticated() {
    let api = client(FakeTransport::default().reply(200, r#"{"content":"x","filename":"togal-readme.md"}"#));
    let doc = block_on(api.research_document("togal-readme")).unwrap();
    assert_eq!(doc.filename, "togal-readme.md");
    assert_eq!(api.transport.sent.borrow()[0].url, "/api/research/togal-readme");
}

#[test]
fn test_sample_projects_and_stats() {
    let list = r#"{"projects":[{"id":1,"name":"Ambrose","delivery_method":"PLAN_SPEC_BID","type":"School","size_mb":310.5,
        "document_counts":{"total":130}}],"total":1}"#;
    let stats = r#"{"total_projects":1,"total_documents":130,"total_size_mb":310.5,"total_size_gb":0.3,
        "delivery_methods":{"PLAN_SPEC_BID":1}}"#;
    let api = client(FakeTransport::default().with_token().reply(200, list).with_token().reply(200, stats));

    let projects = block_on(api.list_sample_projects()).unwrap();
    assert_eq!(projects[0].name, "Ambrose");
    let stats = block_on(api.sample_project_stats()).unwrap();
    assert_eq!(stats.delivery_methods.get("PLAN_SPEC_BID"), Some(&1));

    let sent = api.transport.sent.borrow();
    assert_eq!(sent[1].url, "http://api.test/api/sample-projects");
    assert_eq!(sent[3].url, "http://api.test/api/sample-projects/stats");
}
