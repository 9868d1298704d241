//! Error types produced while building descriptors and reading records.

use thiserror::Error;

use crate::{FieldType, NameViolation};

/// Errors reported by descriptor construction and record accessors.
///
/// Descriptor errors are usage mistakes detected before any record is
/// synthesized, so the failing call never yields a partial record.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnystructError {
    /// A field name is not exported by convention.
    #[error("invalid field name {name:?}: {reason}")]
    InvalidFieldName {
        /// The rejected name, or the rendered value supplied in its place.
        name: String,
        /// Which part of the naming convention the name violates.
        reason: NameViolation,
    },

    /// Flat arguments do not split into pairs or triples.
    #[error(
        "invalid descriptor arity: {len} arguments do not form name/value pairs or name/value/tag triples"
    )]
    InvalidDescriptorArity {
        /// Number of flat arguments supplied.
        len: usize,
    },

    /// A tag argument is not a string.
    #[error("invalid tag at argument {index}: expected a string, found {found}")]
    InvalidTagType {
        /// Zero-based position of the tag within the flat arguments.
        index: usize,
        /// Runtime type of the offending argument.
        found: FieldType,
    },

    /// A typed accessor asked for a field the record does not declare.
    #[error("record has no field named {name:?}")]
    MissingField {
        /// Name that was looked up.
        name: String,
    },

    /// A field value could not be decoded into the requested type.
    #[error("failed to decode record at {path}: {source}")]
    Decode {
        /// Path to the value that failed, in `field.nested[0]` form.
        path: String,
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias used throughout the crate.
pub type AnystructResult<T> = Result<T, AnystructError>;

impl AnystructError {
    pub(crate) fn decode(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        Self::Decode {
            path,
            source: err.into_inner(),
        }
    }

    pub(crate) fn decode_field(name: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            path: name.to_owned(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::AnystructError;
    use crate::{FieldType, NameViolation};

    #[rstest]
    #[case::name(
        AnystructError::InvalidFieldName { name: "_n".into(), reason: NameViolation::Private },
        "invalid field name \"_n\": name starts with an underscore",
    )]
    #[case::arity(
        AnystructError::InvalidDescriptorArity { len: 5 },
        "invalid descriptor arity: 5 arguments do not form name/value pairs or name/value/tag triples",
    )]
    #[case::tag(
        AnystructError::InvalidTagType { index: 2, found: FieldType::Integer },
        "invalid tag at argument 2: expected a string, found i64",
    )]
    #[case::missing(
        AnystructError::MissingField { name: "n".into() },
        "record has no field named \"n\"",
    )]
    fn renders_messages(#[case] err: AnystructError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }
}
