//! Web server implementation

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use vpcconsole_cloud::{provision, teardown, HttpNetworkApi, NetworkApi, ProvisionRequest};
use vpcconsole_common::{Error, UserStore};

use crate::static_files;

/// Header carrying the login session token
pub const SESSION_HEADER: &str = "x-vpcconsole-session";

/// Web server configuration
#[derive(Clone, Debug)]
pub struct WebServerConfig {
    /// Base URL of the cloud networking gateway
    pub cloud_addr: String,
    /// Path of the JSON credential file
    pub user_file: PathBuf,
    /// Directory holding the logo and other static assets
    pub assets_dir: PathBuf,
}

/// Web server state
#[derive(Clone)]
pub struct WebServer {
    state: Arc<WebServerState>,
}

struct WebServerState {
    /// Login sessions: token -> session. Never expired or removed; the
    /// console has no logout, and a fresh client simply holds no token.
    sessions: RwLock<HashMap<String, Session>>,
    users: UserStore,
    api: Arc<dyn NetworkApi>,
    assets_dir: PathBuf,
}

#[derive(Debug, Clone)]
struct Session {
    username: String,
    #[allow(dead_code)]
    created_at: i64,
}

impl WebServer {
    pub fn new(api: Arc<dyn NetworkApi>, users: UserStore, assets_dir: PathBuf) -> Self {
        Self {
            state: Arc::new(WebServerState {
                sessions: RwLock::new(HashMap::new()),
                users,
                api,
                assets_dir,
            }),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(index))
            .route("/assets/logo.png", get(logo))
            .route("/api/login", post(login))
            .route("/api/vpcs", post(create_vpc).get(list_vpcs))
            .route("/api/vpcs/:vpc_id", delete(delete_vpc))
            .route("/api/users", post(create_user))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }
}

/// Bind and run the console against a real cloud gateway
pub async fn serve(addr: SocketAddr, cfg: WebServerConfig) -> anyhow::Result<()> {
    let api: Arc<dyn NetworkApi> = Arc::new(HttpNetworkApi::new(&cfg.cloud_addr));
    let server = WebServer::new(api, UserStore::new(cfg.user_file), cfg.assets_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, server.router()).await?;
    Ok(())
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

// Expected outcomes (validation, duplicates) map to 4xx; provider and
// environment failures to 502/500.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::DuplicateUser(_) => StatusCode::CONFLICT,
            Error::Provider(_) => StatusCode::BAD_GATEWAY,
            Error::Io(_) | Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody { error: "authentication required".to_string() }),
    )
        .into_response()
}

async fn session_user(state: &WebServerState, headers: &HeaderMap) -> Option<String> {
    let token = headers.get(SESSION_HEADER)?.to_str().ok()?;
    let sessions = state.sessions.read().await;
    sessions.get(token).map(|s| s.username.clone())
}

// ============================================================================
// Handlers
// ============================================================================

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn logo(State(state): State<Arc<WebServerState>>) -> Response {
    static_files::serve_logo(&state.assets_dir).await
}

async fn login(
    State(state): State<Arc<WebServerState>>,
    Json(req): Json<LoginRequest>,
) -> Response {
    match state.users.exists_and_matches(&req.username, &req.password) {
        Ok(true) => {
            let token = Uuid::new_v4().to_string();
            let session = Session {
                username: req.username.clone(),
                created_at: Utc::now().timestamp(),
            };
            state.sessions.write().await.insert(token.clone(), session);
            info!("user {} authenticated", req.username);
            Json(LoginResponse { token }).into_response()
        }
        Ok(false) => {
            warn!("failed login attempt for {}", req.username);
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody { error: "invalid username or password".to_string() }),
            )
                .into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

async fn create_vpc(
    State(state): State<Arc<WebServerState>>,
    headers: HeaderMap,
    Json(req): Json<ProvisionRequest>,
) -> Response {
    let Some(username) = session_user(&state, &headers).await else {
        return unauthorized();
    };

    match provision(state.api.as_ref(), &req).await {
        Ok(outcome) => {
            info!("user {} created VPC {}", username, outcome.vpc_id);
            Json(outcome).into_response()
        }
        Err(e) => {
            warn!("VPC creation failed: {}", e);
            ApiError(e).into_response()
        }
    }
}

// Listing and deletion are reachable without a session, matching the
// console this replaces.
async fn list_vpcs(State(state): State<Arc<WebServerState>>) -> Response {
    match teardown::list_vpcs(state.api.as_ref()).await {
        Ok(vpcs) => Json(vpcs).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

async fn delete_vpc(
    State(state): State<Arc<WebServerState>>,
    Path(vpc_id): Path<String>,
) -> Response {
    match teardown::teardown(state.api.as_ref(), &vpc_id).await {
        Ok(()) => {
            info!("VPC {} deleted", vpc_id);
            Json(MessageBody { message: format!("VPC {vpc_id} deleted") }).into_response()
        }
        Err(e) => {
            warn!("{}", e);
            ApiError(e).into_response()
        }
    }
}

async fn create_user(
    State(state): State<Arc<WebServerState>>,
    Json(req): Json<CreateUserRequest>,
) -> Response {
    if req.username.trim().is_empty() || req.password.trim().is_empty() {
        return ApiError(Error::Validation(
            "please enter both username and password".to_string(),
        ))
        .into_response();
    }

    match state.users.add(&req.username, &req.password) {
        Ok(()) => {
            info!("user {} created", req.username);
            Json(MessageBody { message: format!("user {} created", req.username) })
                .into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}
