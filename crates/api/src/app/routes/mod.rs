use axum::{routing::get, Router};

pub mod case_studies;
pub mod common;
pub mod leads;
pub mod posts;
pub mod system;
pub mod testimonials;

/// Router for every endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/test", get(system::diagnostics))
        .nest("/api", api_router())
}

fn api_router() -> Router {
    Router::new()
        .route("/hello", get(system::hello))
        .nest("/leads", leads::router())
        .nest("/posts", posts::router())
        .nest("/case-studies", case_studies::router())
        .nest("/testimonials", testimonials::router())
}
