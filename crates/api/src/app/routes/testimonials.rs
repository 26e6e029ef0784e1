use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query};
use axum::{routing::get, Json, Router};

use agencysite_core::Testimonial;

use crate::app::dto::ListQuery;
use crate::app::errors::ApiError;
use crate::app::routes::common::{self, Services};

pub fn router() -> Router {
    Router::new().route("/", get(list_testimonials))
}

pub async fn list_testimonials(
    Extension(services): Services,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    common::list(services, query).await
}
