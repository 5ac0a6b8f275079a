//! Read access to stored brands.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shopintel_core::BrandContext;
use shopintel_db::{BrandRow, DbError};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct BrandSummary {
    pub id: i64,
    pub public_id: Uuid,
    pub store_url: String,
    pub is_competitor: bool,
    pub discovered_from: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<BrandRow> for BrandSummary {
    fn from(row: BrandRow) -> Self {
        Self {
            id: row.id,
            public_id: row.public_id,
            store_url: row.store_url,
            is_competitor: row.is_competitor,
            discovered_from: row.discovered_from,
            created_at: row.created_at,
        }
    }
}

fn brand_not_found(req_id: &str, id: i64) -> ApiError {
    ApiError::new(req_id, "not_found", format!("brand {id} not found"))
}

/// GET /api/v1/brands
pub(super) async fn list_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<BrandSummary>>>, ApiError> {
    let rows = shopintel_db::list_brands(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::success(
        rows.into_iter().map(BrandSummary::from).collect(),
        req_id.0,
    )))
}

/// GET /api/v1/brands/{id}: the stored brand rebuilt as a [`BrandContext`].
pub(super) async fn get_brand(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BrandContext>>, ApiError> {
    let brand = shopintel_db::get_brand_context(&state.pool, id)
        .await
        .map_err(|e| match e {
            DbError::NotFound => brand_not_found(&req_id.0, id),
            other => map_db_error(req_id.0.clone(), &other),
        })?;

    Ok(Json(ApiResponse::success(brand, req_id.0)))
}

/// GET /api/v1/brands/{id}/competitors
pub(super) async fn list_competitors(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<BrandSummary>>>, ApiError> {
    shopintel_db::get_brand(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| brand_not_found(&req_id.0, id))?;

    let rows = shopintel_db::list_competitors(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::success(
        rows.into_iter().map(BrandSummary::from).collect(),
        req_id.0,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use shopintel_core::{BrandContext, Faq};

    use super::super::test_support::get;

    async fn seed(pool: &sqlx::PgPool) -> (i64, i64) {
        let mut primary = BrandContext::empty("https://memy.co.in");
        primary.faqs.push(Faq {
            question: "COD?".to_string(),
            answer: "Yes.".to_string(),
        });
        let primary_id = shopintel_db::insert_brand_context(pool, &primary, None)
            .await
            .expect("insert primary");
        let rival_id = shopintel_db::insert_brand_context(
            pool,
            &BrandContext::empty("https://rival.myshopify.com"),
            Some(primary_id),
        )
        .await
        .expect("insert rival");
        (primary_id, rival_id)
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn list_brands_returns_all_rows(pool: sqlx::PgPool) {
        seed(&pool).await;

        let (status, json) = get(pool, "/api/v1/brands").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().expect("data array");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["store_url"], "https://memy.co.in");
        assert_eq!(rows[1]["is_competitor"], true);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn get_brand_rebuilds_context(pool: sqlx::PgPool) {
        let (primary_id, _) = seed(&pool).await;

        let (status, json) = get(pool, &format!("/api/v1/brands/{primary_id}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["store_url"], "https://memy.co.in");
        assert_eq!(json["data"]["faqs"][0]["question"], "COD?");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn get_brand_missing_is_404(pool: sqlx::PgPool) {
        let (status, json) = get(pool, "/api/v1/brands/4242").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error_code"], 404);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn list_competitors_returns_discovered_brands(pool: sqlx::PgPool) {
        let (primary_id, rival_id) = seed(&pool).await;

        let (status, json) = get(pool, &format!("/api/v1/brands/{primary_id}/competitors")).await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().expect("data array");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], rival_id);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn list_competitors_for_missing_brand_is_404(pool: sqlx::PgPool) {
        let (status, _) = get(pool, "/api/v1/brands/77/competitors").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
