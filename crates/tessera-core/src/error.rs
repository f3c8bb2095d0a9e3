#![forbid(unsafe_code)]

//! Validation errors for caller-supplied layouts.

use std::fmt;

/// What was wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Missing, or present with a non-numeric value.
    NotANumber,
    /// Present with a non-string value.
    NotAString,
    /// Present with a non-boolean value.
    NotABoolean,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotANumber => "must be a number",
            Self::NotAString => "must be a string",
            Self::NotABoolean => "must be a boolean",
        })
    }
}

/// A layout that violates the input contract.
///
/// These are programming errors on the caller side; the algebra never
/// recovers from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The layout value is not a list.
    NotAnArray { context: String },
    /// An entry is not an object.
    NotAnObject { context: String, index: usize },
    /// A field has the wrong type or is missing.
    Field {
        context: String,
        index: usize,
        field: &'static str,
        issue: ValidationIssue,
    },
    /// An item id is empty.
    EmptyId { context: String, index: usize },
    /// Two items share an id.
    DuplicateId { context: String, id: String },
    /// `w` or `h` is zero.
    ZeroSpan { id: String, field: &'static str },
    /// A minimum clamp exceeds its maximum.
    InvertedBounds {
        id: String,
        axis: &'static str,
        min: u32,
        max: u32,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnArray { context } => write!(f, "{context} must be an array"),
            Self::NotAnObject { context, index } => {
                write!(f, "{context}[{index}] must be an object")
            }
            Self::Field {
                context,
                index,
                field,
                issue,
            } => write!(f, "{context}[{index}].{field} {issue}"),
            Self::EmptyId { context, index } => write!(f, "{context}[{index}].id is empty"),
            Self::DuplicateId { context, id } => {
                write!(f, "{context} contains duplicate id `{id}`")
            }
            Self::ZeroSpan { id, field } => write!(f, "item `{id}` has zero {field}"),
            Self::InvertedBounds { id, axis, min, max } => write!(
                f,
                "item `{id}` has min {axis} {min} greater than max {axis} {max}"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
