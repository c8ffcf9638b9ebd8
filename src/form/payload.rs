//! Request-body serialization of validated form values.

use crate::api::{Part, Payload};
use crate::model::{EntityKind, FieldKind};
use crate::utils::path::expand_path;
use serde_json::{Map, Value};

/// JSON for most entities; multipart, in field order, when the entity has a
/// file field. Multi-reference ids become one text part per id.
pub fn build(kind: EntityKind, values: Map<String, Value>) -> Payload {
    if !kind.uses_multipart() {
        return Payload::Json(Value::Object(values));
    }

    let mut parts = Vec::new();
    for field in kind.fields() {
        let Some(value) = values.get(field.key) else {
            continue;
        };
        match field.kind {
            FieldKind::Attachment => {
                if let Some(path) = value.as_str() {
                    parts.push(Part::File {
                        name: field.key.to_string(),
                        path: expand_path(path),
                    });
                }
            }
            FieldKind::MultiReference { part_name, .. } => {
                for id in value.as_array().into_iter().flatten() {
                    parts.push(Part::Text {
                        name: part_name.to_string(),
                        value: text_of(id),
                    });
                }
            }
            _ => parts.push(Part::Text {
                name: field.key.to_string(),
                value: text_of(value),
            }),
        }
    }
    Payload::Multipart(parts)
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
