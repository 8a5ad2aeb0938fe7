use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rank_resolver_engine::{
    parse_name_list, EngineError, Mode, RankEngine, ResolveRequest, ResolveResponse, WebSource,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<RankEngine>,
}

/// POST body: explicit name list
#[derive(Debug, Deserialize)]
struct ResolveBody {
    names: Vec<String>,
    #[serde(default)]
    mode: Mode,
}

/// GET query: delimited name string
#[derive(Debug, Deserialize)]
struct ResolveParams {
    #[serde(default)]
    names: String,
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rank_resolver_server=debug,rank_resolver_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("🚀 Starting Rank Resolver Server");
    tracing::info!("🔌 Port: {}", port);

    let engine = RankEngine::new(Arc::new(WebSource::new()?));

    let state = AppState {
        engine: Arc::new(engine),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/v1/resolve",
            get(resolve_query_handler).post(resolve_body_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🏓 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: rank_resolver_engine::VERSION.to_string(),
    })
}

async fn resolve_query_handler(
    State(state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<ResolveResponse>, AppError> {
    let names = parse_name_list(&params.names);
    let mode = Mode::parse(params.mode.as_deref().unwrap_or(""));
    run_resolve(&state, names, mode).await
}

async fn resolve_body_handler(
    State(state): State<AppState>,
    Json(body): Json<ResolveBody>,
) -> Result<Json<ResolveResponse>, AppError> {
    let names: Vec<String> = body
        .names
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    run_resolve(&state, names, body.mode).await
}

async fn run_resolve(
    state: &AppState,
    names: Vec<String>,
    mode: Mode,
) -> Result<Json<ResolveResponse>, AppError> {
    if names.is_empty() {
        return Err(AppError::EmptyNames);
    }

    let response = state
        .engine
        .resolve(ResolveRequest { names, mode })
        .await
        .map_err(AppError::Engine)?;

    tracing::info!(
        "✅ {} rows ({} matched, {} mode, {:.1}ms)",
        response.rows.len(),
        response.matched_count(),
        response.mode,
        response.latency_ms
    );

    Ok(Json(response))
}

// Error handling
enum AppError {
    EmptyNames,
    Engine(EngineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::EmptyNames => (
                StatusCode::BAD_REQUEST,
                "Provide at least one name".to_string(),
            ),
            AppError::Engine(e @ EngineError::FetchFailed { .. }) => {
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            AppError::Engine(e @ EngineError::NoTableFound)
            | AppError::Engine(e @ EngineError::UnrecognizedShape) => {
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            AppError::Engine(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
