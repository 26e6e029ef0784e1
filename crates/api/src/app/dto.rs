use serde::{Deserialize, Serialize};

// -------------------------
// Request DTOs
// -------------------------

/// `?limit=` on list endpoints. Absent or `0` means an unscoped scan.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LeadCreated {
    pub status: &'static str,
    pub id: String,
}

/// Body of `GET /test`: human-readable store reachability report.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub backend: String,
    pub store: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}
