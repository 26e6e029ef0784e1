use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde_json::Value;

use crate::app::dto::LeadCreated;
use crate::app::errors::ApiError;
use crate::app::routes::common::Services;

pub fn router() -> Router {
    Router::new().route("/", post(create_lead))
}

pub async fn create_lead(
    Extension(services): Services,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LeadCreated>, ApiError> {
    let Json(body) = body?;
    let Value::Object(payload) = body else {
        return Err(ApiError::InvalidBody {
            status: StatusCode::BAD_REQUEST,
            message: "lead payload must be a JSON object".to_string(),
        });
    };

    let id = services.create_lead(&payload).await?;
    Ok(Json(LeadCreated {
        status: "ok",
        id: id.to_string(),
    }))
}
