use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Path, Query};
use axum::{routing::get, Json, Router};

use agencysite_core::Post;

use crate::app::dto::ListQuery;
use crate::app::errors::ApiError;
use crate::app::routes::common::{self, Services};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_posts))
        .route("/:slug", get(get_post))
}

pub async fn list_posts(
    Extension(services): Services,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Post>>, ApiError> {
    common::list(services, query).await
}

pub async fn get_post(
    Extension(services): Services,
    slug: Path<String>,
) -> Result<Json<Post>, ApiError> {
    common::get_by_slug(services, slug).await
}
