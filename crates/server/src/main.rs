// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use pap_monitor_api::{
    ApiError, DashboardView, LoginRequest, LoginResponse, RegisterTestRequest,
    RegisterTestResponse, SessionState, UpdateTestRequest, UpdateTestResponse, WhoAmIResponse,
    export_tests_csv, register_test, render_dashboard, update_test, whoami,
};
use pap_monitor_persistence::{Persistence, SeedReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::{AuthenticatedSession, BrowserSession, SessionStore};

/// PAP Monitor Server - HTTP server for the PAP test dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. Created if missing.
    #[arg(short, long, default_value = "pap.db")]
    database: String,

    /// Use a throw-away in-memory database instead of `--database`
    #[arg(long)]
    in_memory: bool,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8501)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The single store connection shared by every session.
    persistence: Arc<Mutex<Persistence>>,
    /// Browser sessions by token.
    sessions: Arc<Mutex<SessionStore>>,
}

/// Response for actions without a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    success: bool,
    message: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } | ApiError::AuthenticationRequired => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::StoreWriteFailure { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/login` endpoint.
///
/// Opens a new browser session on valid credentials.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(username = %req.username, "Handling login request");

    let mut state: SessionState = SessionState::default();
    let mut persistence = app_state.persistence.lock().await;
    let result: Result<LoginResponse, ApiError> = state.login(&mut persistence, &req);
    drop(persistence);

    let response: LoginResponse = result?;

    let mut sessions = app_state.sessions.lock().await;
    sessions.insert(response.session_token.clone(), state);
    let active_sessions: usize = sessions.active_sessions();
    drop(sessions);

    info!(username = %response.username, active_sessions, "Session opened");

    Ok(Json(response))
}

/// Handler for POST `/logout` endpoint.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedSession(token, _context): AuthenticatedSession,
) -> Json<WriteResponse> {
    let mut sessions = app_state.sessions.lock().await;
    let removed: Option<SessionState> = sessions.remove(&token);
    let active_sessions: usize = sessions.active_sessions();
    drop(sessions);

    if let Some(mut state) = removed {
        state.logout();
    }
    info!(active_sessions, "Session closed");

    Json(WriteResponse {
        success: true,
        message: None,
    })
}

/// Handler for GET `/whoami` endpoint.
#[allow(clippy::unused_async)]
async fn handle_whoami(
    AuthenticatedSession(_token, context): AuthenticatedSession,
) -> Json<WhoAmIResponse> {
    Json(whoami(&context))
}

/// Handler for GET `/dashboard` endpoint.
///
/// Renders the login view for anonymous callers and the role's dashboard
/// otherwise.
async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    BrowserSession(state): BrowserSession,
) -> Json<DashboardView> {
    let mut persistence = app_state.persistence.lock().await;
    let view: DashboardView = render_dashboard(&state, &mut persistence);
    drop(persistence);

    Json(view)
}

/// Handler for POST `/tests` endpoint.
///
/// Registers a test at the calling clinician's facility.
async fn handle_register_test(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedSession(_token, context): AuthenticatedSession,
    Json(req): Json<RegisterTestRequest>,
) -> Result<Json<RegisterTestResponse>, HttpError> {
    info!(username = %context.username, "Handling register_test request");

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<RegisterTestResponse, ApiError> =
        register_test(&context, &mut persistence, &req);
    drop(persistence);

    Ok(Json(result?))
}

/// Handler for POST `/tests/update` endpoint.
///
/// Overwrites status and result of a test. Supervisors only.
async fn handle_update_test(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedSession(_token, context): AuthenticatedSession,
    Json(req): Json<UpdateTestRequest>,
) -> Result<Json<UpdateTestResponse>, HttpError> {
    info!(
        username = %context.username,
        test_id = req.test_id,
        status = %req.status,
        "Handling update_test request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<UpdateTestResponse, ApiError> =
        update_test(&context, &mut persistence, &req);
    drop(persistence);

    Ok(Json(result?))
}

/// Handler for GET `/tests/export` endpoint.
///
/// Downloads the caller's test table as CSV.
async fn handle_export_tests(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedSession(_token, context): AuthenticatedSession,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: Result<String, ApiError> = export_tests_csv(&context, &mut persistence);
    drop(persistence);

    let csv: String = result?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"pruebas_pap.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/whoami", get(handle_whoami))
        .route("/dashboard", get(handle_dashboard))
        .route("/tests", post(handle_register_test))
        .route("/tests/update", post(handle_update_test))
        .route("/tests/export", get(handle_export_tests))
        .with_state(app_state)
}

/// Loads the reference rows. A failure is logged and start-up continues.
fn seed(persistence: &mut Persistence) {
    match persistence.seed_reference_data() {
        Ok(report) => log_seed_report(&report),
        Err(e) => error!(error = %e, "Failed to load reference data"),
    }
}

fn log_seed_report(report: &SeedReport) {
    if report.is_noop() {
        info!("Reference data already present");
    } else {
        info!(
            micro_networks = report.micro_networks_inserted,
            facilities = report.facilities_inserted,
            users = report.users_inserted,
            "Loaded reference data"
        );
    }

    if report.skipped > 0 {
        warn!(skipped = report.skipped, "Some reference rows were skipped");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing PAP Monitor Server");

    // Schema failures are fatal
    let mut persistence: Persistence = if args.in_memory {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    } else {
        info!("Using file-based database at: {}", args.database);
        Persistence::new_with_file(&args.database)?
    };

    seed(&mut persistence);

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        sessions: Arc::new(Mutex::new(SessionStore::new())),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Helper to create test app state with a seeded in-memory store.
    fn create_test_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        seed(&mut persistence);
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
        }
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    async fn login(app: &Router, username: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                &json!({ "username": username, "password": password }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let login: LoginResponse = serde_json::from_value(body_json(response).await).unwrap();
        login.session_token
    }

    fn registration(patient_name: &str) -> Value {
        json!({
            "patient_name": patient_name,
            "age": 34,
            "sample_date": "2024-01-10",
            "delivery_date": "2024-01-20",
        })
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                &json!({ "username": "x", "password": "y" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Usuario o contraseña incorrectos");
    }

    #[tokio::test]
    async fn test_login_returns_identity() {
        let app_state = create_test_app_state();
        let app: Router = build_router(app_state.clone());

        let response = app
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                &json!({ "username": "jefe", "password": "admin123" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let login: LoginResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(login.username, "jefe");
        assert_eq!(login.role, "jefe");
        assert_eq!(login.facility_id, None);
        assert_eq!(app_state.sessions.lock().await.active_sessions(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_dashboard_is_login() {
        let app: Router = build_router(create_test_app_state());

        let response = app.oneshot(get_request("/dashboard", None)).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(body_json(response).await["view"], "login");
    }

    #[tokio::test]
    async fn test_unknown_token_dashboard_is_login() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(get_request("/dashboard", Some("session_0_0")))
            .await
            .unwrap();

        assert_eq!(body_json(response).await["view"], "login");
    }

    #[tokio::test]
    async fn test_whoami_requires_session() {
        let app: Router = build_router(create_test_app_state());

        let response = app.oneshot(get_request("/whoami", None)).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_authorization_header_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/dashboard")
                    .header("Authorization", "Token abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_clinician_registers_and_sees_test() {
        let app: Router = build_router(create_test_app_state());
        let token = login(&app, "obstetra1", "12345").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/tests",
                Some(&token),
                &registration("Maria Lopez"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let registered: RegisterTestResponse =
            serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(registered.message, "Prueba registrada correctamente");

        let response = app
            .oneshot(get_request("/dashboard", Some(&token)))
            .await
            .unwrap();
        let view = body_json(response).await;

        assert_eq!(view["view"], "clinician");
        assert_eq!(view["welcome"], "Bienvenido, obstetra1");
        assert_eq!(view["sidebar"]["facility_name"], "Establecimiento A");
        assert_eq!(view["sidebar"]["statistics"]["total"], 1);
        assert_eq!(view["tests"][0]["patient_name"], "Maria Lopez");
        assert_eq!(view["tests"][0]["status"], "pendiente");
        assert_eq!(view["tests"][0]["result"], Value::Null);
    }

    #[tokio::test]
    async fn test_register_rejects_out_of_range_age() {
        let app: Router = build_router(create_test_app_state());
        let token = login(&app, "obstetra1", "12345").await;

        let mut body = registration("Edad Invalida");
        body["age"] = json!(5);

        let response = app
            .oneshot(json_request("POST", "/tests", Some(&token), &body))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_supervisor_cannot_register() {
        let app: Router = build_router(create_test_app_state());
        let token = login(&app, "jefe", "admin123").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/tests",
                Some(&token),
                &registration("Maria Lopez"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_clinician_cannot_update() {
        let app: Router = build_router(create_test_app_state());
        let token = login(&app, "obstetra1", "12345").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/tests/update",
                Some(&token),
                &json!({ "test_id": 1, "status": "completado", "result": "positivo" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_supervisor_updates_test() {
        let app: Router = build_router(create_test_app_state());
        let clinician = login(&app, "obstetra2", "12345").await;
        let supervisor = login(&app, "jefe", "admin123").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/tests",
                Some(&clinician),
                &registration("Rosa Quispe"),
            ))
            .await
            .unwrap();
        let registered: RegisterTestResponse =
            serde_json::from_value(body_json(response).await).unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/tests/update",
                Some(&supervisor),
                &json!({
                    "test_id": registered.test_id,
                    "status": "completado",
                    "result": "negativo",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let updated: UpdateTestResponse =
            serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(updated.rows_affected, 1);
        assert_eq!(updated.message, "Prueba actualizada correctamente");

        let response = app
            .oneshot(get_request("/dashboard", Some(&supervisor)))
            .await
            .unwrap();
        let view = body_json(response).await;

        assert_eq!(view["view"], "supervisor");
        assert_eq!(view["sidebar"]["facility_name"], "Acceso Global");
        assert_eq!(view["sidebar"]["statistics"], Value::Null);
        assert_eq!(view["tests"][0]["facility_name"], "Establecimiento B");
        assert_eq!(view["tests"][0]["status"], "completado");
        assert_eq!(view["tests"][0]["result"], "negativo");
        assert_eq!(view["tests"][0]["result_class"], "negative");
    }

    #[tokio::test]
    async fn test_update_unknown_test_succeeds() {
        let app: Router = build_router(create_test_app_state());
        let token = login(&app, "jefe", "admin123").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/tests/update",
                Some(&token),
                &json!({ "test_id": 999, "status": "completado", "result": "positivo" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let updated: UpdateTestResponse =
            serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(updated.rows_affected, 0);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let app_state = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let token = login(&app, "obstetra1", "12345").await;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/logout", Some(&token), &json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(app_state.sessions.lock().await.active_sessions(), 0);

        let response = app
            .clone()
            .oneshot(get_request("/whoami", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(get_request("/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["view"], "login");
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let app: Router = build_router(create_test_app_state());
        let clinician = login(&app, "obstetra1", "12345").await;
        let supervisor = login(&app, "jefe", "admin123").await;

        let response = app
            .clone()
            .oneshot(get_request("/whoami", Some(&clinician)))
            .await
            .unwrap();
        let me: WhoAmIResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(me.username, "obstetra1");

        let response = app
            .oneshot(get_request("/whoami", Some(&supervisor)))
            .await
            .unwrap();
        let me: WhoAmIResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(me.username, "jefe");
        assert_eq!(me.welcome, "Bienvenido, jefe");
    }

    #[tokio::test]
    async fn test_export_returns_csv() {
        let app: Router = build_router(create_test_app_state());
        let token = login(&app, "obstetra1", "12345").await;

        app.clone()
            .oneshot(json_request(
                "POST",
                "/tests",
                Some(&token),
                &registration("Maria Lopez"),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(get_request("/tests/export", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let csv = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(csv.starts_with("ID,Nombre,Edad"));
        assert!(csv.contains("Maria Lopez"));
    }

    #[test]
    fn test_api_error_status_mapping() {
        let cases: [(ApiError, StatusCode); 6] = [
            (
                ApiError::AuthenticationFailed {
                    reason: String::from("bad"),
                },
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::AuthenticationRequired, StatusCode::UNAUTHORIZED),
            (
                ApiError::Unauthorized {
                    action: String::from("update_test"),
                    required_role: String::from("jefe"),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::InvalidInput {
                    field: String::from("age"),
                    message: String::from("bad"),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::StoreWriteFailure {
                    cause: String::from("locked"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Internal {
                    message: String::from("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let http: HttpError = err.into();
            assert_eq!(http.status, expected);
        }
    }
}
