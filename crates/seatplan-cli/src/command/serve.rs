use std::net::Ipv4Addr;

use anyhow::Context as _;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use seatplan_engine::schema::{SeatingRequest, SeatingResponse};
use seatplan_optimizer::{SeatingSolver, SolveError};
use serde_json::error::Category;
use tokio::task::JoinError;
use tower_http::{
    LatencyUnit,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

const ROUTE: &str = "/generate-seating";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ServeArg {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Origin allowed to call the service from a browser
    #[arg(long, env = "ALLOWED_ORIGIN")]
    allowed_origin: Option<String>,
}

#[derive(Debug, derive_more::Display)]
enum ApiError {
    #[display("Type error: {_0}")]
    Type(serde_json::Error),
    #[display("Invalid request body: {_0}")]
    Body(serde_json::Error),
    #[display("Invalid input or no solution found: {_0}")]
    Solve(SolveError),
    #[display("Solver failed: {_0}")]
    Worker(JoinError),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::Type(err),
            _ => Self::Body(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Type(_) | Self::Body(_) | Self::Solve(_) => StatusCode::BAD_REQUEST,
            Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(%status, error = %self, "request rejected");
        (status, self.to_string()).into_response()
    }
}

async fn generate_seating(
    State(solver): State<SeatingSolver>,
    body: Bytes,
) -> Result<Json<SeatingResponse>, ApiError> {
    let request = serde_json::from_slice::<SeatingRequest>(&body)?;
    let response = tokio::task::spawn_blocking(move || solver.solve(&request))
        .await
        .map_err(ApiError::Worker)?
        .map_err(ApiError::Solve)?;
    Ok(Json(response))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

fn cors(allowed_origin: Option<HeaderValue>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    match allowed_origin {
        Some(origin) => layer.allow_origin(origin),
        None => layer,
    }
}

fn app(solver: SeatingSolver, allowed_origin: Option<HeaderValue>) -> Router {
    Router::new()
        .route(
            ROUTE,
            post(generate_seating)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors(allowed_origin))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(solver)
}

pub(crate) fn run(arg: &ServeArg, solver: SeatingSolver) -> anyhow::Result<()> {
    let allowed_origin = arg
        .allowed_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("ALLOWED_ORIGIN is not a valid header value")?;
    let app = app(solver, allowed_origin);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, arg.port))
            .await
            .with_context(|| format!("Failed to bind port {}", arg.port))?;
        let addr = listener
            .local_addr()
            .context("Failed to read the listening address")?;
        tracing::info!(
            %addr,
            route = ROUTE,
            workers = solver.workers().get(),
            "seating service listening"
        );
        axum::serve(listener, app).await.context("Server exited unexpectedly")
    })
}
