mod brands;
mod insights;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shopintel_scraper::{BrandAssembler, CompetitorDiscoverer};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub assembler: Arc<BrandAssembler>,
    /// `None` when competitor discovery is disabled.
    pub discoverer: Option<Arc<CompetitorDiscoverer>>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    http_status: StatusCode,
    pub status: &'static str,
    pub error: ErrorBody,
    pub error_code: u16,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn success(data: T, request_id: String) -> Self {
        Self {
            status: "success",
            data,
            meta: ResponseMeta::new(request_id),
        }
    }

    /// Partial answer served alongside a non-2xx status.
    pub(super) fn degraded(data: T, request_id: String) -> Self {
        Self {
            status: "degraded",
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    /// Error whose HTTP status follows from `code`.
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let code = code.into();
        let http_status = match code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            http_status,
            status: "error",
            error: ErrorBody {
                code,
                message: message.into(),
            },
            error_code: http_status.as_u16(),
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    /// Overrides the HTTP status derived from the error code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.http_status = status;
        self.error_code = status.as_u16();
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.http_status, Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: String, error: &shopintel_db::DbError) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::new(request_id, "internal_error", "database query failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/fetch-insights", post(insights::fetch_insights))
        .route("/api/v1/brands", get(brands::list_brands))
        .route("/api/v1/brands/{id}", get(brands::get_brand))
        .route(
            "/api/v1/brands/{id}/competitors",
            get(brands::list_competitors),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    health_response(shopintel_db::health_check(&state.pool).await, req_id.0)
}

fn health_response(
    check: Result<(), shopintel_db::DbError>,
    request_id: String,
) -> (StatusCode, Json<ApiResponse<HealthData>>) {
    match check {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                HealthData {
                    status: "ok",
                    database: "ok",
                },
                request_id,
            )),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::degraded(
                    HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    request_id,
                )),
            )
        }
    }
}
