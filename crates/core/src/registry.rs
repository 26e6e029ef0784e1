//! Schema registry operations: validate inbound payloads, project stored documents.
//!
//! Both directions walk the same field tables from [`crate::schema`], so a field
//! added to a schema is validated on write and projected on read without any
//! per-handler code.
//!
//! The two directions differ in strictness:
//! - `validate` checks content constraints (non-empty, email syntax) and collects
//!   every violation.
//! - `project` only checks presence and JSON shape, and stops at the first problem.
//!   A stored document that fails here is a server-side fault.

use serde_json::Value;

use crate::email::is_valid_email;
use crate::error::{FieldViolation, MappingError, ValidationError};
use crate::record::{Entity, Record};
use crate::schema::{Constraint, EntityKind, FieldSpec, Presence};
use crate::Document;

/// Storage collection for `kind`.
pub fn collection_name(kind: EntityKind) -> &'static str {
    kind.collection_name()
}

/// A payload that passed validation, normalized to exactly the recognized fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecord {
    kind: EntityKind,
    fields: Document,
}

impl ValidRecord {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The normalized document, ready to be written to the store.
    pub fn into_document(self) -> Document {
        self.fields
    }

    /// Decode into the typed record for `E`.
    pub fn into_entity<E: Entity>(self) -> Result<E, MappingError> {
        decode(self.kind, self.fields)
    }
}

/// Validate an inbound payload for `kind`.
///
/// Unknown fields are dropped. Every failing field is reported in the returned
/// error; validation does not stop at the first problem.
pub fn validate(kind: EntityKind, payload: &Document) -> Result<ValidRecord, ValidationError> {
    let mut fields = Document::new();
    let mut violations = Vec::new();

    for spec in kind.fields() {
        match present(payload, spec.name) {
            None => match spec.presence {
                Presence::Required => {
                    violations.push(FieldViolation::new(spec.name, "field required"));
                }
                Presence::Optional { default } => {
                    fields.insert(spec.name.to_string(), default_value(default));
                }
            },
            Some(value) => match check_constraint(spec.constraint, value) {
                Ok(()) => {
                    fields.insert(spec.name.to_string(), value.clone());
                }
                Err(message) => violations.push(FieldViolation::new(spec.name, message)),
            },
        }
    }

    if violations.is_empty() {
        Ok(ValidRecord { kind, fields })
    } else {
        Err(ValidationError::new(kind, violations))
    }
}

/// Project a stored document into the record for `kind`.
pub fn project(kind: EntityKind, document: &Document) -> Result<Record, MappingError> {
    let fields = project_fields(kind, document)?;
    Ok(match kind {
        EntityKind::Lead => Record::Lead(decode(kind, fields)?),
        EntityKind::Post => Record::Post(decode(kind, fields)?),
        EntityKind::CaseStudy => Record::CaseStudy(decode(kind, fields)?),
        EntityKind::Testimonial => Record::Testimonial(decode(kind, fields)?),
    })
}

/// Typed form of [`project`].
pub fn project_as<E: Entity>(document: &Document) -> Result<E, MappingError> {
    let fields = project_fields(E::KIND, document)?;
    decode(E::KIND, fields)
}

fn project_fields(kind: EntityKind, document: &Document) -> Result<Document, MappingError> {
    let mut fields = Document::new();

    for spec in kind.fields() {
        let value = match present(document, spec.name) {
            None => match spec.presence {
                Presence::Required => {
                    return Err(MappingError::MissingField {
                        kind,
                        field: spec.name,
                    });
                }
                Presence::Optional { default } => default_value(default),
            },
            Some(value) if has_shape(spec, value) => value.clone(),
            Some(_) => {
                return Err(MappingError::WrongType {
                    kind,
                    field: spec.name,
                    expected: spec.constraint.expected(),
                });
            }
        };
        fields.insert(spec.name.to_string(), value);
    }

    Ok(fields)
}

fn decode<E: Entity>(kind: EntityKind, fields: Document) -> Result<E, MappingError> {
    if kind != E::KIND {
        return Err(MappingError::Decode {
            kind,
            message: format!("record is not a {}", E::KIND),
        });
    }
    serde_json::from_value(Value::Object(fields)).map_err(|e| MappingError::Decode {
        kind,
        message: e.to_string(),
    })
}

/// `null` is treated the same as an absent field.
fn present<'a>(doc: &'a Document, field: &str) -> Option<&'a Value> {
    doc.get(field).filter(|v| !v.is_null())
}

fn default_value(default: Option<&'static str>) -> Value {
    default.map_or(Value::Null, |d| Value::String(d.to_string()))
}

fn has_shape(spec: &FieldSpec, value: &Value) -> bool {
    match spec.constraint {
        Constraint::Text | Constraint::NonEmptyText | Constraint::Email => value.is_string(),
        Constraint::TextList => is_text_list(value),
    }
}

fn is_text_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

fn check_constraint(constraint: Constraint, value: &Value) -> Result<(), &'static str> {
    match constraint {
        Constraint::Text => value.as_str().map(|_| ()).ok_or("expected a string"),
        Constraint::NonEmptyText => match value.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(()),
            Some(_) => Err("must not be empty"),
            None => Err("expected a string"),
        },
        Constraint::Email => match value.as_str() {
            Some(s) if is_valid_email(s) => Ok(()),
            Some(_) => Err("value is not a valid email address"),
            None => Err("expected a string"),
        },
        Constraint::TextList => {
            if is_text_list(value) {
                Ok(())
            } else {
                Err("expected a list of strings")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CaseStudy, Lead, Post, Testimonial};
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn valid_lead_fills_optional_defaults() {
        let payload = doc(json!({ "name": "Ada Lovelace", "email": "ada@example.com" }));

        let record = validate(EntityKind::Lead, &payload).unwrap();

        assert_eq!(record.get("name"), Some(&json!("Ada Lovelace")));
        assert_eq!(record.get("email"), Some(&json!("ada@example.com")));
        assert_eq!(record.get("source"), Some(&json!("website")));
        for field in ["phone", "service", "message", "schedule_iso"] {
            assert_eq!(record.get(field), Some(&Value::Null), "{field}");
        }
        assert_eq!(record.fields().len(), EntityKind::Lead.fields().len());
    }

    #[test]
    fn explicit_source_is_kept() {
        let payload = doc(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "source": "referral",
            "schedule_iso": "2026-11-02T10:00:00Z"
        }));

        let lead: Lead = validate(EntityKind::Lead, &payload)
            .unwrap()
            .into_entity()
            .unwrap();

        assert_eq!(lead.source, "referral");
        assert_eq!(lead.schedule_iso.as_deref(), Some("2026-11-02T10:00:00Z"));
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let payload = doc(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "utm_campaign": "autumn"
        }));

        let record = validate(EntityKind::Lead, &payload).unwrap();
        assert!(record.get("utm_campaign").is_none());
    }

    #[test]
    fn missing_email_is_reported() {
        let payload = doc(json!({ "name": "Ada" }));

        let err = validate(EntityKind::Lead, &payload).unwrap_err();
        assert!(err.names_field("email"));
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn malformed_email_is_reported() {
        let payload = doc(json!({ "name": "Ada", "email": "not-an-email" }));

        let err = validate(EntityKind::Lead, &payload).unwrap_err();
        assert_eq!(
            err.violations(),
            &[FieldViolation::new("email", "value is not a valid email address")]
        );
    }

    #[test]
    fn every_violation_is_collected() {
        let payload = doc(json!({ "name": "   ", "email": 42, "phone": ["555"] }));

        let err = validate(EntityKind::Lead, &payload).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "phone"]);
        assert_eq!(err.violations()[0].message, "must not be empty");
        assert_eq!(err.violations()[1].message, "expected a string");
    }

    #[test]
    fn null_required_field_counts_as_missing() {
        let payload = doc(json!({ "name": null, "email": "ada@example.com" }));

        let err = validate(EntityKind::Lead, &payload).unwrap_err();
        assert_eq!(err.violations(), &[FieldViolation::new("name", "field required")]);
    }

    #[test]
    fn tags_must_be_strings() {
        let payload = doc(json!({ "title": "A", "slug": "a", "tags": ["x", 1] }));

        let err = validate(EntityKind::Post, &payload).unwrap_err();
        assert_eq!(
            err.violations(),
            &[FieldViolation::new("tags", "expected a list of strings")]
        );
    }

    #[test]
    fn project_post_defaults_optionals_and_ignores_store_fields() {
        let stored = doc(json!({
            "_id": "0193f0a2-0000-7000-8000-000000000000",
            "created_at": "2026-10-14T09:00:00Z",
            "title": "A",
            "slug": "a",
            "tags": ["x", "y"]
        }));

        let post: Post = project_as(&stored).unwrap();
        assert_eq!(
            post,
            Post {
                title: "A".into(),
                slug: "a".into(),
                description: None,
                content: None,
                tags: Some(vec!["x".into(), "y".into()]),
            }
        );
    }

    #[test]
    fn project_post_without_title_fails() {
        let stored = doc(json!({ "slug": "a" }));

        let err = project_as::<Post>(&stored).unwrap_err();
        assert_eq!(
            err,
            MappingError::MissingField {
                kind: EntityKind::Post,
                field: "title"
            }
        );
    }

    #[test]
    fn project_rejects_wrong_typed_field() {
        let stored = doc(json!({ "title": "A", "slug": "a", "industries": "retail" }));

        let err = project_as::<CaseStudy>(&stored).unwrap_err();
        assert_eq!(
            err,
            MappingError::WrongType {
                kind: EntityKind::CaseStudy,
                field: "industries",
                expected: "a list of strings"
            }
        );
    }

    #[test]
    fn wrong_typed_optional_field_fails_projection() {
        let stored = doc(json!({ "title": "A", "slug": "a", "description": 5 }));

        let err = project(EntityKind::Post, &stored).unwrap_err();
        assert_eq!(
            err,
            MappingError::WrongType {
                kind: EntityKind::Post,
                field: "description",
                expected: "a string"
            }
        );
    }

    #[test]
    fn numbers_are_not_stringified() {
        let stored = doc(json!({ "name": 7, "quote": "Great work" }));

        let err = project_as::<Testimonial>(&stored).unwrap_err();
        assert!(matches!(err, MappingError::WrongType { field: "name", .. }));
    }

    #[test]
    fn project_does_not_recheck_content_constraints() {
        // Older documents may predate the non-empty rule; shape is what matters on read.
        let stored = doc(json!({ "name": "", "quote": "Great work" }));

        let testimonial: Testimonial = project_as(&stored).unwrap();
        assert_eq!(testimonial.name, "");
        assert_eq!(testimonial.role, None);
    }

    #[test]
    fn project_dispatches_on_kind() {
        let stored = doc(json!({ "name": "Grace", "quote": "Superb", "company": "Navy" }));

        let record = project(EntityKind::Testimonial, &stored).unwrap();
        assert_eq!(record.kind(), EntityKind::Testimonial);
        match record {
            Record::Testimonial(t) => assert_eq!(t.company.as_deref(), Some("Navy")),
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn into_entity_rejects_a_different_kind() {
        let payload = doc(json!({ "name": "Ada", "email": "ada@example.com" }));
        let record = validate(EntityKind::Lead, &payload).unwrap();

        let err = record.into_entity::<Post>().unwrap_err();
        assert!(matches!(err, MappingError::Decode { kind: EntityKind::Lead, .. }));
    }

    #[test]
    fn collection_name_matches_kind() {
        assert_eq!(collection_name(EntityKind::CaseStudy), "casestudy");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: well-formed leads always validate and echo their required fields.
            #[test]
            fn well_formed_leads_validate(
                name in "[A-Za-z][A-Za-z .'-]{0,40}",
                local in "[a-z0-9]{1,16}(\\.[a-z0-9]{1,8})?",
                domain in "[a-z]{1,12}\\.[a-z]{2,6}",
            ) {
                let email = format!("{local}@{domain}");
                let payload = doc(json!({ "name": name.clone(), "email": email.clone() }));

                let record = validate(EntityKind::Lead, &payload).unwrap();
                prop_assert_eq!(record.get("name"), Some(&json!(name)));
                prop_assert_eq!(record.get("email"), Some(&json!(email)));
                prop_assert_eq!(record.get("source"), Some(&json!("website")));
            }

            /// Property: a string without `@` is never accepted as an email.
            #[test]
            fn strings_without_at_are_rejected(email in "[^@]{0,40}") {
                let payload = doc(json!({ "name": "Ada", "email": email }));

                let err = validate(EntityKind::Lead, &payload).unwrap_err();
                prop_assert!(err.names_field("email"));
            }

            /// Property: projecting a validated post yields the same fields back.
            #[test]
            fn validated_posts_project_cleanly(
                title in "[A-Za-z][A-Za-z0-9 ]{0,30}",
                slug in "[a-z][a-z0-9-]{0,30}",
                tags in proptest::collection::vec("[a-z]{1,8}", 0..5),
            ) {
                let payload = doc(json!({ "title": title.clone(), "slug": slug.clone(), "tags": tags.clone() }));

                let stored = validate(EntityKind::Post, &payload).unwrap().into_document();
                let post: Post = project_as(&stored).unwrap();
                prop_assert_eq!(post.title, title);
                prop_assert_eq!(post.slug, slug);
                prop_assert_eq!(post.tags, Some(tags));
            }
        }
    }
}
