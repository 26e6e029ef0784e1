//! `agencysite-core`: content schemas and the document mapping contract.
//!
//! This crate is **pure**: it validates inbound payloads, projects loosely-typed
//! store documents into typed records, and names storage collections. It never
//! performs IO.

pub mod email;
pub mod error;
pub mod id;
pub mod record;
pub mod registry;
pub mod schema;

pub use error::{FieldViolation, MappingError, ValidationError};
pub use id::DocumentId;
pub use record::{CaseStudy, Entity, Lead, Post, Record, Testimonial};
pub use registry::{collection_name, project, project_as, validate, ValidRecord};
pub use schema::{Constraint, EntityKind, FieldSpec, Presence};

/// Loosely-typed, store-native representation of a record (top-level JSON object).
pub type Document = serde_json::Map<String, serde_json::Value>;
