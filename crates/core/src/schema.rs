//! Enumerated schema definitions: the four content kinds and their fields.

use serde::{Deserialize, Serialize};

/// The content kinds served by the API.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Lead,
    Post,
    CaseStudy,
    Testimonial,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Lead,
        EntityKind::Post,
        EntityKind::CaseStudy,
        EntityKind::Testimonial,
    ];

    /// Schema type name.
    pub const fn type_name(self) -> &'static str {
        match self {
            EntityKind::Lead => "Lead",
            EntityKind::Post => "Post",
            EntityKind::CaseStudy => "CaseStudy",
            EntityKind::Testimonial => "Testimonial",
        }
    }

    /// Storage collection for this kind (lowercase type name).
    pub const fn collection_name(self) -> &'static str {
        match self {
            EntityKind::Lead => "lead",
            EntityKind::Post => "post",
            EntityKind::CaseStudy => "casestudy",
            EntityKind::Testimonial => "testimonial",
        }
    }

    /// Human-readable label used in client-facing messages.
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Lead => "Lead",
            EntityKind::Post => "Post",
            EntityKind::CaseStudy => "Case study",
            EntityKind::Testimonial => "Testimonial",
        }
    }

    /// Recognized fields, in declaration order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Lead => LEAD_FIELDS,
            EntityKind::Post => POST_FIELDS,
            EntityKind::CaseStudy => CASE_STUDY_FIELDS,
            EntityKind::Testimonial => TESTIMONIAL_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Whether records of this kind are addressable by `slug`.
    pub fn has_slug(self) -> bool {
        self.field("slug").is_some()
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// What a field's value must look like.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Free text; any string.
    Text,
    /// A string with at least one non-whitespace character.
    NonEmptyText,
    /// `local@domain` with a dotted domain.
    Email,
    /// Ordered sequence of strings.
    TextList,
}

impl Constraint {
    /// Short description of the JSON shape this constraint accepts.
    pub const fn expected(self) -> &'static str {
        match self {
            Constraint::Text | Constraint::NonEmptyText | Constraint::Email => "a string",
            Constraint::TextList => "a list of strings",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Absent (or `null`) values are replaced by `default`, or `null` when there is none.
    Optional { default: Option<&'static str> },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub constraint: Constraint,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }
}

const fn required(name: &'static str, constraint: Constraint) -> FieldSpec {
    FieldSpec {
        name,
        constraint,
        presence: Presence::Required,
    }
}

const fn optional(name: &'static str, constraint: Constraint) -> FieldSpec {
    FieldSpec {
        name,
        constraint,
        presence: Presence::Optional { default: None },
    }
}

const fn optional_or(name: &'static str, constraint: Constraint, default: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        constraint,
        presence: Presence::Optional {
            default: Some(default),
        },
    }
}

/// Default `source` for leads that don't say where they came from.
pub const DEFAULT_LEAD_SOURCE: &str = "website";

const LEAD_FIELDS: &[FieldSpec] = &[
    required("name", Constraint::NonEmptyText),
    required("email", Constraint::Email),
    optional("phone", Constraint::Text),
    optional("service", Constraint::Text),
    optional("message", Constraint::Text),
    // ISO 8601 by convention; stored as the client sent it.
    optional("schedule_iso", Constraint::Text),
    optional_or("source", Constraint::Text, DEFAULT_LEAD_SOURCE),
];

const POST_FIELDS: &[FieldSpec] = &[
    required("title", Constraint::NonEmptyText),
    required("slug", Constraint::NonEmptyText),
    optional("description", Constraint::Text),
    optional("content", Constraint::Text),
    optional("tags", Constraint::TextList),
];

const CASE_STUDY_FIELDS: &[FieldSpec] = &[
    required("title", Constraint::NonEmptyText),
    required("slug", Constraint::NonEmptyText),
    optional("client", Constraint::Text),
    optional("summary", Constraint::Text),
    optional("results", Constraint::Text),
    optional("industries", Constraint::TextList),
];

const TESTIMONIAL_FIELDS: &[FieldSpec] = &[
    required("name", Constraint::NonEmptyText),
    optional("role", Constraint::Text),
    optional("company", Constraint::Text),
    required("quote", Constraint::NonEmptyText),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn collection_names_are_fixed_per_kind() {
        assert_eq!(EntityKind::Lead.collection_name(), "lead");
        assert_eq!(EntityKind::Post.collection_name(), "post");
        assert_eq!(EntityKind::CaseStudy.collection_name(), "casestudy");
        assert_eq!(EntityKind::Testimonial.collection_name(), "testimonial");
    }

    #[test]
    fn collection_name_is_lowercased_type_name() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.collection_name(), kind.type_name().to_lowercase());
        }
    }

    #[test]
    fn collection_names_do_not_collide() {
        let names: HashSet<_> = EntityKind::ALL.iter().map(|k| k.collection_name()).collect();
        assert_eq!(names.len(), EntityKind::ALL.len());
    }

    #[test]
    fn only_posts_and_case_studies_have_slugs() {
        assert!(EntityKind::Post.has_slug());
        assert!(EntityKind::CaseStudy.has_slug());
        assert!(!EntityKind::Lead.has_slug());
        assert!(!EntityKind::Testimonial.has_slug());
    }

    #[test]
    fn field_names_are_unique_within_each_kind() {
        for kind in EntityKind::ALL {
            let names: HashSet<_> = kind.fields().iter().map(|f| f.name).collect();
            assert_eq!(names.len(), kind.fields().len(), "duplicate field in {kind}");
        }
    }

    #[test]
    fn lead_source_defaults_to_website() {
        let source = EntityKind::Lead.field("source").unwrap();
        assert_eq!(
            source.presence,
            Presence::Optional {
                default: Some("website")
            }
        );
        assert!(EntityKind::Lead.field("email").unwrap().is_required());
    }
}
