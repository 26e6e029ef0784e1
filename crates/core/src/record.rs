//! Typed, schema-conformant records (the response shapes).

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::schema::EntityKind;

/// A typed record bound to one schema kind.
pub trait Entity: Serialize + DeserializeOwned + Send + 'static {
    const KIND: EntityKind;
}

/// Marketing lead from a contact or booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    pub schedule_iso: Option<String>,
    pub source: String,
}

/// Blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Case study / portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub title: String,
    pub slug: String,
    pub client: Option<String>,
    pub summary: Option<String>,
    pub results: Option<String>,
    pub industries: Option<Vec<String>>,
}

/// Client testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub quote: String,
}

impl Entity for Lead {
    const KIND: EntityKind = EntityKind::Lead;
}

impl Entity for Post {
    const KIND: EntityKind = EntityKind::Post;
}

impl Entity for CaseStudy {
    const KIND: EntityKind = EntityKind::CaseStudy;
}

impl Entity for Testimonial {
    const KIND: EntityKind = EntityKind::Testimonial;
}

/// Any record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Lead(Lead),
    Post(Post),
    CaseStudy(CaseStudy),
    Testimonial(Testimonial),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Lead(_) => EntityKind::Lead,
            Record::Post(_) => EntityKind::Post,
            Record::CaseStudy(_) => EntityKind::CaseStudy,
            Record::Testimonial(_) => EntityKind::Testimonial,
        }
    }
}
