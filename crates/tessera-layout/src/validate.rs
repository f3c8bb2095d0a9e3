#![forbid(unsafe_code)]

//! Input validation.
//!
//! [`validate_value`] checks loosely typed input (for example, layouts read
//! from JSON) before it is deserialized. [`validate_layout`] checks the typed
//! contract the algebra relies on.

use rustc_hash::FxHashSet;
use serde_json::Value;
use tessera_core::{LayoutItem, ValidationError, ValidationIssue};

const NUMERIC_FIELDS: [&str; 4] = ["x", "y", "w", "h"];

/// Check raw input against the layout shape.
///
/// Every entry must be an object with numeric `x`, `y`, `w`, `h`. An id under
/// `id` or `i`, when present, must be a string; a static flag under `static`
/// or `isStatic`, when present, must be a boolean. The first violation is
/// reported.
pub fn validate_value(value: &Value, context: &str) -> Result<(), ValidationError> {
    let Some(entries) = value.as_array() else {
        return Err(ValidationError::NotAnArray {
            context: context.to_owned(),
        });
    };

    for (index, entry) in entries.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            return Err(ValidationError::NotAnObject {
                context: context.to_owned(),
                index,
            });
        };
        let field_error = |field: &'static str, issue| ValidationError::Field {
            context: context.to_owned(),
            index,
            field,
            issue,
        };

        for field in NUMERIC_FIELDS {
            if !obj.get(field).is_some_and(Value::is_number) {
                return Err(field_error(field, ValidationIssue::NotANumber));
            }
        }
        for field in ["id", "i"] {
            if obj.get(field).is_some_and(|v| !v.is_string()) {
                return Err(field_error(field, ValidationIssue::NotAString));
            }
        }
        for field in ["static", "isStatic"] {
            if obj.get(field).is_some_and(|v| !v.is_boolean()) {
                return Err(field_error(field, ValidationIssue::NotABoolean));
            }
        }
    }
    Ok(())
}

/// Check a typed layout: non-empty unique ids, non-zero spans and ordered
/// resize clamps.
pub fn validate_layout(layout: &[LayoutItem], context: &str) -> Result<(), ValidationError> {
    let mut seen = FxHashSet::default();
    for (index, item) in layout.iter().enumerate() {
        if item.id.is_empty() {
            return Err(ValidationError::EmptyId {
                context: context.to_owned(),
                index,
            });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                context: context.to_owned(),
                id: item.id.clone(),
            });
        }
        validate_item(item)?;
    }
    Ok(())
}

/// Span and clamp checks for a single item.
pub fn validate_item(item: &LayoutItem) -> Result<(), ValidationError> {
    if item.w == 0 {
        return Err(ValidationError::ZeroSpan {
            id: item.id.clone(),
            field: "w",
        });
    }
    if item.h == 0 {
        return Err(ValidationError::ZeroSpan {
            id: item.id.clone(),
            field: "h",
        });
    }
    if let (Some(min), Some(max)) = (item.min_w, item.max_w)
        && min > max
    {
        return Err(ValidationError::InvertedBounds {
            id: item.id.clone(),
            axis: "width",
            min,
            max,
        });
    }
    if let (Some(min), Some(max)) = (item.min_h, item.max_h)
        && min > max
    {
        return Err(ValidationError::InvertedBounds {
            id: item.id.clone(),
            axis: "height",
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_input() {
        let value = json!([
            {"i": "a", "x": 0, "y": 0, "w": 1, "h": 1, "static": true},
            {"id": "b", "x": 1, "y": 0, "w": 2, "h": 1, "isStatic": false},
        ]);
        assert_eq!(validate_value(&value, "Layout"), Ok(()));
    }

    #[test]
    fn rejects_non_array() {
        let err = validate_value(&json!({"x": 1}), "Layout").unwrap_err();
        assert_eq!(err.to_string(), "Layout must be an array");
    }

    #[test]
    fn rejects_missing_or_non_numeric_fields() {
        let err = validate_value(&json!([{"x": 0, "y": 0, "w": "2", "h": 1}]), "Layout")
            .unwrap_err();
        assert_eq!(err.to_string(), "Layout[0].w must be a number");

        let err = validate_value(&json!([{"x": 0, "y": 0, "w": 2}]), "Children").unwrap_err();
        assert_eq!(err.to_string(), "Children[0].h must be a number");
    }

    #[test]
    fn rejects_bad_id_and_static() {
        let err =
            validate_value(&json!([{"i": 3, "x": 0, "y": 0, "w": 1, "h": 1}]), "Layout").unwrap_err();
        assert_eq!(err.to_string(), "Layout[0].i must be a string");

        let err = validate_value(
            &json!([{"x": 0, "y": 0, "w": 1, "h": 1}, {"x": 0, "y": 0, "w": 1, "h": 1, "static": "yes"}]),
            "Layout",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Layout[1].static must be a boolean");
    }

    #[test]
    fn rejects_non_object_entries() {
        let err = validate_value(&json!([1]), "Layout").unwrap_err();
        assert!(matches!(err, ValidationError::NotAnObject { index: 0, .. }));
    }

    #[test]
    fn typed_checks() {
        let ok = vec![LayoutItem::new("a", 0, 0, 1, 1), LayoutItem::new("b", 0, 0, 1, 1)];
        assert_eq!(validate_layout(&ok, "Layout"), Ok(()));

        let dup = vec![LayoutItem::new("a", 0, 0, 1, 1), LayoutItem::new("a", 1, 0, 1, 1)];
        assert!(matches!(
            validate_layout(&dup, "Layout"),
            Err(ValidationError::DuplicateId { .. })
        ));

        let empty = vec![LayoutItem::new("", 0, 0, 1, 1)];
        assert!(matches!(
            validate_layout(&empty, "Layout"),
            Err(ValidationError::EmptyId { index: 0, .. })
        ));

        let zero = vec![LayoutItem::new("z", 0, 0, 1, 0)];
        assert_eq!(
            validate_layout(&zero, "Layout"),
            Err(ValidationError::ZeroSpan {
                id: "z".into(),
                field: "h"
            })
        );

        let inverted = LayoutItem::new("c", 0, 0, 1, 1).with_height_bounds(Some(3), Some(1));
        assert!(matches!(
            validate_item(&inverted),
            Err(ValidationError::InvertedBounds { axis: "height", .. })
        ));
    }
}
