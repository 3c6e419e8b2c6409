//! ApiClient behaviour against a mock backend.
//!
//! These tests use wiremock to simulate the SchoolHub backend and check
//! token attachment, the 401/403 policy and the login flow.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use schoolhub_core::api::ApiError;
use schoolhub_core::auth::storage::{MemoryStorage, SessionStorage, SESSION_KEY};
use schoolhub_core::models::{Profile, Role, StudentForm, SubmissionForm};
use schoolhub_core::navigation::{Navigator, Route};
use schoolhub_core::{ApiClient, SessionStore};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Navigator that remembers every route it was sent to
#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Memory storage that counts removals of the session record,
/// i.e. how many times the store was logged out.
#[derive(Default)]
struct CountingStorage {
    inner: MemoryStorage,
    session_removals: AtomicUsize,
}

impl SessionStorage for CountingStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        if key == SESSION_KEY {
            self.session_removals.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.remove(key)
    }
}

struct Harness {
    server: MockServer,
    api: ApiClient,
    session: SessionStore,
    navigator: Arc<RecordingNavigator>,
    storage: Arc<CountingStorage>,
}

impl Harness {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let storage = Arc::new(CountingStorage::default());
        let session = SessionStore::open(storage.clone());
        let navigator = Arc::new(RecordingNavigator::default());
        let api = ApiClient::new(&server.uri(), session.clone(), navigator.clone()).unwrap();
        Self {
            server,
            api,
            session,
            navigator,
            storage,
        }
    }

    fn login_as(&self, token: &str, role: Role) {
        self.session.set_auth(
            token,
            Profile {
                id: 1,
                email: "user@school.edu".to_string(),
                role,
                name: None,
            },
        );
    }

    fn logouts(&self) -> usize {
        self.storage.session_removals.load(Ordering::SeqCst)
    }

    async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap()
    }
}

fn courses_body() -> serde_json::Value {
    json!([{"id": 1, "name": "Algebra I", "code": "MATH101"}])
}

// ============================================================================
// Token attachment
// ============================================================================

#[tokio::test]
async fn test_token_attached_as_bearer() {
    let h = Harness::start().await;
    h.login_as("abc", Role::Student);

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(courses_body()))
        .expect(1)
        .mount(&h.server)
        .await;

    let courses = h.api.list_courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].code.as_deref(), Some("MATH101"));
}

#[tokio::test]
async fn test_no_token_sends_no_authorization_header() {
    let h = Harness::start().await;

    Mock::given(method("GET"))
        .and(path("/api/semesters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;

    let semesters = h.api.list_semesters().await.unwrap();
    assert!(semesters.is_empty());

    let requests = h.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_token_changes_are_picked_up_per_request() {
    let h = Harness::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(courses_body()))
        .mount(&h.server)
        .await;

    h.login_as("first", Role::Teacher);
    h.api.list_courses().await.unwrap();
    h.login_as("second", Role::Teacher);
    h.api.list_courses().await.unwrap();

    let requests = h.requests().await;
    assert_eq!(requests[0].headers.get("authorization").unwrap(), "Bearer first");
    assert_eq!(requests[1].headers.get("authorization").unwrap(), "Bearer second");
}

// ============================================================================
// Failure policy
// ============================================================================

#[tokio::test]
async fn test_401_logs_out_and_navigates_once() {
    let h = Harness::start().await;
    h.login_as("expired", Role::Admin);

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&h.server)
        .await;

    let result = h.api.list_users().await;

    // Caller still sees the failure
    assert!(matches!(result, Err(ApiError::Unauthorized)));
    assert!(!h.session.is_authenticated());
    assert!(h.session.token().is_none());
    assert!(h.session.user().is_none());
    assert_eq!(h.logouts(), 1);
    assert_eq!(h.navigator.routes(), vec![Route::Login]);
}

#[tokio::test]
async fn test_403_leaves_session_untouched() {
    let h = Harness::start().await;
    h.login_as("valid", Role::Teacher);
    let before = h.session.snapshot();
    let rx = h.session.subscribe();

    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/5"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Only administrators can delete users"})),
        )
        .mount(&h.server)
        .await;

    let err = h.api.delete_user(5).await.unwrap_err();
    match err {
        ApiError::AccessDenied(ref msg) => assert_eq!(msg, "Only administrators can delete users"),
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status(), Some(reqwest::StatusCode::FORBIDDEN));

    assert_eq!(h.session.snapshot(), before);
    assert!(!rx.has_changed().unwrap());
    assert_eq!(h.logouts(), 0);
    assert!(h.navigator.routes().is_empty());
}

#[tokio::test]
async fn test_server_error_propagates_without_retry() {
    let h = Harness::start().await;
    h.login_as("valid", Role::Student);

    Mock::given(method("GET"))
        .and(path("/api/student/assignments"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h.api.my_assignments().await.unwrap_err();
    assert!(matches!(err, ApiError::ServerError(ref m) if m == "maintenance"));
    assert!(h.session.is_authenticated());
    assert!(h.navigator.routes().is_empty());
}

#[tokio::test]
async fn test_network_failure_propagates() {
    let session = SessionStore::in_memory();
    let navigator = Arc::new(RecordingNavigator::default());
    session.set_auth(
        "valid",
        Profile {
            id: 1,
            email: "user@school.edu".to_string(),
            role: Role::Student,
            name: None,
        },
    );

    // Nothing listens on port 1
    let api = ApiClient::new("http://127.0.0.1:1", session.clone(), navigator.clone()).unwrap();

    let err = api.list_courses().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(session.is_authenticated());
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_undecodable_body_is_invalid_response() {
    let h = Harness::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&h.server)
        .await;

    let err = h.api.list_courses().await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(ref m) if m.contains("/api/courses")));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_then_protected_call_carries_token() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "admin@school.edu", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh-token",
            "role": "ADMIN",
            "id": 3,
            "email": "admin@school.edu",
            "name": "Principal Skinner"
        })))
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "email": "admin@school.edu", "role": "ADMIN", "active": true}
        ])))
        .expect(1)
        .mount(&h.server)
        .await;

    let profile = h.api.login("admin@school.edu", "hunter22").await.unwrap();
    assert_eq!(profile.role, Role::Admin);
    assert_eq!(profile.display_name(), "Principal Skinner");
    assert!(h.session.is_authenticated());
    assert_eq!(h.session.token().as_deref(), Some("fresh-token"));

    let users = h.api.list_users().await.unwrap();
    assert_eq!(users.len(), 1);

    // The credential exchange itself is never sent with a token
    let requests = h.requests().await;
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_bad_credentials_does_not_redirect() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})))
        .mount(&h.server)
        .await;

    let err = h.api.login("admin@school.edu", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials(ref m) if m == "Bad credentials"));
    assert!(!h.session.is_authenticated());
    assert_eq!(h.logouts(), 0);
    assert!(h.navigator.routes().is_empty());
}

#[tokio::test]
async fn test_login_with_empty_401_body_uses_default_message() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let err = h.api.login("admin@school.edu", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials(ref m) if m == "Invalid email or password"));
}

// ============================================================================
// Client-side validation
// ============================================================================

#[tokio::test]
async fn test_invalid_forms_never_reach_the_network() {
    let h = Harness::start().await;
    h.login_as("valid", Role::Admin);

    let err = h.api.login("not-an-email", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(ref e) if e.field == "email"));

    let form = StudentForm {
        first_name: "".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@school.edu".to_string(),
        ..Default::default()
    };
    let err = h.api.create_student(&form).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(ref e) if e.field == "firstName"));

    let err = h
        .api
        .submit_assignment(10, &SubmissionForm::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    assert!(h.requests().await.is_empty());
    assert!(h.session.is_authenticated());
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_after_401_next_call_is_unauthenticated() {
    let h = Harness::start().await;
    h.login_as("stale", Role::Student);

    Mock::given(method("GET"))
        .and(path("/api/student/materials"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(courses_body()))
        .mount(&h.server)
        .await;

    assert!(h.api.my_course_materials().await.unwrap_err().is_unauthorized());
    h.api.list_courses().await.unwrap();

    let requests = h.requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests[1].headers.get("authorization").is_none());
    assert_eq!(h.navigator.routes(), vec![Route::Login]);
}

#[tokio::test]
async fn test_student_crud_and_submission_round_trip() {
    let h = Harness::start().await;
    h.login_as("admin-token", Role::Admin);

    Mock::given(method("POST"))
        .and(path("/api/admin/students"))
        .and(body_json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@school.edu",
            "password": "analytical"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 12, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@school.edu"
        })))
        .mount(&h.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/admin/users/12/deactivate"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/student/assignments/10/submit"))
        .and(body_json(json!({"content": "My essay"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 99, "assignmentId": 10, "status": "SUBMITTED"
        })))
        .mount(&h.server)
        .await;

    let form = StudentForm {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@school.edu".to_string(),
        password: Some("analytical".to_string()),
        ..Default::default()
    };
    let student = h.api.create_student(&form).await.unwrap();
    assert_eq!(student.id, 12);
    assert_eq!(student.full_name(), "Ada Lovelace");

    h.api.deactivate_user(12).await.unwrap();

    let submission = h
        .api
        .submit_assignment(
            10,
            &SubmissionForm {
                content: Some("My essay".to_string()),
                attachment_url: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(submission.assignment_id, 10);
}
