use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Path, Query};
use axum::Json;

use agencysite_core::Entity;

use crate::app::dto::ListQuery;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// Shared list handler body for read-only content kinds.
pub async fn list<E: Entity>(
    services: Arc<AppServices>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<E>>, ApiError> {
    let Query(query) = query?;
    let items = services.list::<E>(query.limit).await?;
    Ok(Json(items))
}

/// Shared get-by-slug handler body for slug-addressed content kinds.
pub async fn get_by_slug<E: Entity>(
    services: Arc<AppServices>,
    Path(slug): Path<String>,
) -> Result<Json<E>, ApiError> {
    let item = services.get_by_slug::<E>(&slug).await?;
    Ok(Json(item))
}

pub type Services = Extension<Arc<AppServices>>;
