//! POST /api/v1/fetch-insights: scrape a storefront, store it, and store
//! its competitors.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use shopintel_core::BrandContext;
use shopintel_db::DbError;
use shopintel_scraper::{brand_name_from_url, ScraperError};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct FetchInsightsRequest {
    website_url: String,
}

pub(super) async fn fetch_insights(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<FetchInsightsRequest>,
) -> Result<Json<ApiResponse<BrandContext>>, ApiError> {
    let rid = &req_id.0;

    let brand = state
        .assembler
        .assemble(&body.website_url)
        .await
        .map_err(|e| map_scraper_error(rid, &e))?;

    let brand_id = shopintel_db::insert_brand_context(&state.pool, &brand, None)
        .await
        .map_err(|e| map_insert_error(rid, &e))?;
    tracing::info!(brand_id, store_url = %brand.store_url, "brand stored");

    if let Some(discoverer) = &state.discoverer {
        match brand_name_from_url(&brand.store_url) {
            Some(name) => {
                let competitors = discoverer.discover(&name, &state.assembler).await;
                store_competitors(&state, brand_id, &competitors).await;
            }
            None => tracing::warn!(
                store_url = %brand.store_url,
                "no brand name derivable from store url; skipping competitors"
            ),
        }
    }

    Ok(Json(ApiResponse::success(brand, req_id.0)))
}

/// Competitor persistence never fails the request.
async fn store_competitors(state: &AppState, brand_id: i64, competitors: &[BrandContext]) {
    for competitor in competitors {
        match shopintel_db::insert_brand_context(&state.pool, competitor, Some(brand_id)).await {
            Ok(id) => tracing::info!(
                competitor_id = id,
                brand_id,
                store_url = %competitor.store_url,
                "competitor stored"
            ),
            Err(e) => tracing::warn!(
                brand_id,
                store_url = %competitor.store_url,
                error = %e,
                "failed to store competitor"
            ),
        }
    }
}

fn map_scraper_error(req_id: &str, e: &ScraperError) -> ApiError {
    match e {
        ScraperError::StorefrontUnreachable { .. } => {
            ApiError::new(req_id, "not_found", "Website not found")
                .with_status(StatusCode::UNAUTHORIZED)
        }
        ScraperError::InvalidStoreUrl { .. } => {
            ApiError::new(req_id, "validation_error", e.to_string())
        }
        _ => {
            tracing::error!(error = %e, "brand assembly failed");
            ApiError::new(req_id, "internal_error", e.to_string())
        }
    }
}

/// Every persistence failure, a repeated `store_url` included, is a 500.
fn map_insert_error(req_id: &str, e: &DbError) -> ApiError {
    match e {
        DbError::Duplicate { .. } => {
            tracing::warn!(error = %e, "brand already stored");
            ApiError::new(req_id, "internal_error", e.to_string())
        }
        _ => map_db_error(req_id.to_owned(), e),
    }
}
