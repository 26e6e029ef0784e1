use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Path, Query};
use axum::{routing::get, Json, Router};

use agencysite_core::CaseStudy;

use crate::app::dto::ListQuery;
use crate::app::errors::ApiError;
use crate::app::routes::common::{self, Services};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_case_studies))
        .route("/:slug", get(get_case_study))
}

pub async fn list_case_studies(
    Extension(services): Services,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<CaseStudy>>, ApiError> {
    common::list(services, query).await
}

pub async fn get_case_study(
    Extension(services): Services,
    slug: Path<String>,
) -> Result<Json<CaseStudy>, ApiError> {
    common::get_by_slug(services, slug).await
}
