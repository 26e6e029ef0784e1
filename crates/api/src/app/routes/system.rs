use axum::extract::Extension;
use axum::Json;

use crate::app::dto::{Diagnostics, Message};
use crate::app::routes::common::Services;

pub async fn root() -> Json<Message> {
    Json(Message {
        message: "Hello from the agency site backend!",
    })
}

pub async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello from the backend API!",
    })
}

/// Store reachability report; always `200 OK`.
pub async fn diagnostics(Extension(services): Services) -> Json<Diagnostics> {
    Json(services.diagnostics().await)
}
