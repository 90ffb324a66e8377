use super::*;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Mutex as StdMutex;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct Captured {
    path: &'static str,
    apikey: Option<String>,
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct ServerState {
    captured: Arc<Mutex<Vec<Captured>>>,
    signup_reply: (StatusCode, Value),
    insert_reply: (StatusCode, Value),
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn capture(state: &ServerState, path: &'static str, headers: &HeaderMap, body: Value) {
    state.captured.lock().await.push(Captured {
        path,
        apikey: header(headers, "apikey"),
        authorization: header(headers, "authorization"),
        body,
    });
}

async fn handle_signup(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    capture(&state, "signup", &headers, body).await;
    let (status, reply) = state.signup_reply.clone();
    (status, Json(reply))
}

async fn handle_insert(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    capture(&state, "insert", &headers, body).await;
    let (status, reply) = state.insert_reply.clone();
    (status, Json(reply))
}

async fn spawn_auth_server(
    signup_reply: (StatusCode, Value),
    insert_reply: (StatusCode, Value),
) -> (String, Arc<Mutex<Vec<Captured>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        captured: Arc::clone(&captured),
        signup_reply,
        insert_reply,
    };
    let app = Router::new()
        .route("/auth/v1/signup", post(handle_signup))
        .route("/rest/v1/early_adopters", post(handle_insert))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), captured)
}

fn rest_backend(base_url: &str) -> RestAuthBackend {
    RestAuthBackend::new(&AuthEndpoint {
        base_url: base_url.to_string(),
        anon_key: "anon-test-key".into(),
        table: "early_adopters".into(),
        timeout_seconds: 5,
    })
    .expect("backend")
}

fn registration(is_early_adopter: bool) -> Registration {
    Registration {
        email: "founder@example.com".into(),
        password: "correct horse".into(),
        is_early_adopter,
    }
}

fn user_reply() -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({ "user": { "id": "user-1", "email": "founder@example.com" }, "session": null }),
    )
}

#[tokio::test]
async fn early_adopter_gets_discount_code_recorded() {
    let (url, captured) = spawn_auth_server(user_reply(), (StatusCode::CREATED, json!({}))).await;
    let backend = rest_backend(&url);

    let outcome = register(&backend, &registration(true)).await.expect("register");
    assert_eq!(
        outcome,
        RegistrationOutcome::Registered {
            email: Some("founder@example.com".into()),
            discount_code: Some("EARLY15".into()),
        }
    );
    assert_eq!(
        outcome.success_message().as_deref(),
        Some("Success! Check your email to verify your account. You've received a 15% discount code: EARLY15!")
    );

    let captured = captured.lock().await;
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].path, "signup");
    assert_eq!(
        captured[0].body,
        json!({
            "email": "founder@example.com",
            "password": "correct horse",
            "data": { "isEarlyAdopter": true, "discountCode": "EARLY15" }
        })
    );
    assert_eq!(captured[0].apikey.as_deref(), Some("anon-test-key"));
    assert_eq!(
        captured[0].authorization.as_deref(),
        Some("Bearer anon-test-key")
    );
    assert_eq!(captured[1].path, "insert");
    assert_eq!(
        captured[1].body,
        json!({
            "email": "founder@example.com",
            "is_early_adopter": true,
            "discount_code": "EARLY15"
        })
    );
}

#[tokio::test]
async fn regular_sign_up_records_null_discount_code() {
    let (url, captured) = spawn_auth_server(user_reply(), (StatusCode::CREATED, json!({}))).await;
    let backend = rest_backend(&url);

    let outcome = register(&backend, &registration(false)).await.expect("register");
    assert_eq!(
        outcome.success_message().as_deref(),
        Some("Success! Check your email to verify your account.")
    );

    let captured = captured.lock().await;
    assert_eq!(captured[1].body["discount_code"], Value::Null);
    assert_eq!(captured[1].body["is_early_adopter"], json!(false));
}

#[tokio::test]
async fn account_error_aborts_before_insert() {
    let (url, captured) = spawn_auth_server(
        (
            StatusCode::BAD_REQUEST,
            json!({ "msg": "User already registered" }),
        ),
        (StatusCode::CREATED, json!({})),
    )
    .await;
    let backend = rest_backend(&url);

    let failure = register(&backend, &registration(true))
        .await
        .expect_err("must fail");
    assert_eq!(failure, SignupFailure::Account("User already registered".into()));
    assert_eq!(captured.lock().await.len(), 1);
}

#[tokio::test]
async fn insert_error_is_reported_with_prefix() {
    let (url, _captured) = spawn_auth_server(
        user_reply(),
        (
            StatusCode::CONFLICT,
            json!({ "code": "23505", "message": "duplicate key value" }),
        ),
    )
    .await;
    let backend = rest_backend(&url);

    let failure = register(&backend, &registration(false))
        .await
        .expect_err("must fail");
    assert_eq!(
        failure.to_string(),
        "Failed to insert record: duplicate key value"
    );
}

#[tokio::test]
async fn missing_user_skips_insert() {
    let (url, captured) = spawn_auth_server(
        (StatusCode::OK, json!({ "user": null, "session": null })),
        (StatusCode::CREATED, json!({})),
    )
    .await;
    let backend = rest_backend(&url);

    let outcome = register(&backend, &registration(true)).await.expect("register");
    assert_eq!(outcome, RegistrationOutcome::AwaitingUser);
    assert_eq!(outcome.success_message(), None);
    assert_eq!(captured.lock().await.len(), 1);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

    let backend = rest_backend(&format!("http://{addr}"));
    let failure = register(&backend, &registration(false))
        .await
        .expect_err("must fail");
    assert!(matches!(failure, SignupFailure::Transport(_)), "{failure:?}");
}

#[derive(Default)]
struct RecordingBackend {
    records: StdMutex<Vec<EarlyAdopterRecord>>,
}

#[async_trait]
impl AuthBackend for RecordingBackend {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, SignupFailure> {
        Ok(SignUpResponse {
            user: Some(shared::protocol::AuthUser {
                id: "u".into(),
                email: Some(request.email.clone()),
            }),
        })
    }

    async fn insert_record(&self, record: &EarlyAdopterRecord) -> Result<(), SignupFailure> {
        self.records.lock().expect("lock").push(record.clone());
        Ok(())
    }
}

#[tokio::test]
async fn validation_runs_before_any_call() {
    let backend = RecordingBackend::default();
    let mut blank = registration(true);
    blank.email = "  ".into();
    let failure = register(&backend, &blank).await.expect_err("blank email");
    assert_eq!(failure, SignupFailure::Validation("Email is required".into()));
    assert!(backend.records.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn unconfigured_backend_rejects_submissions() {
    let failure = register(&UnconfiguredAuthBackend, &registration(false))
        .await
        .expect_err("not configured");
    assert!(matches!(failure, SignupFailure::NotConfigured(_)));
}

#[tokio::test]
async fn form_guards_against_double_submit() {
    let backend = RecordingBackend::default();
    let mut form = SignupForm {
        email: "early@example.com".into(),
        password: "pw".into(),
        is_early_adopter: true,
        ..SignupForm::default()
    };

    let registration = form.begin_submit().expect("first submit");
    assert!(form.is_loading());
    assert_eq!(form.button_label(), "Signing Up...");
    assert!(form.begin_submit().is_err());

    let result = register(&backend, &registration).await;
    assert!(form.finish(result));
    assert!(!form.is_loading());
    assert_eq!(form.error(), None);
    assert!(form.notice().expect("notice").contains("EARLY15"));
    assert!(form.password.is_empty());

    let records = backend.records.lock().expect("lock");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].discount_code.as_deref(), Some("EARLY15"));
}

#[test]
fn form_shows_validation_failure_inline() {
    let mut form = SignupForm::default();
    assert!(form.begin_submit().is_err());
    assert_eq!(form.error(), Some("Email is required"));
    assert!(!form.is_loading());

    form.email = "a@b.co".into();
    form.begin_submit().expect_err("no password");
    assert_eq!(form.error(), Some("Password is required"));
}

#[test]
fn registration_debug_redacts_password() {
    let text = format!("{:?}", registration(false));
    assert!(!text.contains("correct horse"));
    assert!(text.contains("<redacted>"));
}
