//! The interleaved `name, value[, tag]` calling convention.

use serde_json::Value;

use crate::{
    AnystructError, AnystructResult, FieldCollection, FieldDescriptor, FieldType, NameViolation,
    Record, synthesize,
};

/// How flat arguments split into descriptors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Grouping {
    Pairs,
    Triples,
}

impl Grouping {
    /// Triples only when the count is divisible by three but not by two, so
    /// six arguments read as three pairs.
    fn detect(len: usize) -> AnystructResult<Self> {
        if len.is_multiple_of(3) && !len.is_multiple_of(2) {
            Ok(Self::Triples)
        } else if len.is_multiple_of(2) {
            Ok(Self::Pairs)
        } else {
            Err(AnystructError::InvalidDescriptorArity { len })
        }
    }

    const fn width(self) -> usize {
        match self {
            Self::Pairs => 2,
            Self::Triples => 3,
        }
    }
}

/// Synthesize a record from interleaved `name, value` pairs or
/// `name, value, tag` triples.
///
/// Names and tags must be JSON strings. No arguments yield the empty record.
/// Each field is declared with the runtime type of its JSON value.
///
/// The argument count decides the grouping: triples when it is divisible by
/// three but not by two, otherwise pairs when it is even. A count divisible
/// by six, such as `n, 1, t, s, x, u`, is therefore read as three untagged
/// pairs; build tagged fields with [`crate::field`] or [`crate::record!`]
/// when that matters.
///
/// # Errors
///
/// - [`AnystructError::InvalidDescriptorArity`] when the count fits neither
///   grouping.
/// - [`AnystructError::InvalidFieldName`] for the first name that is not a
///   string or not public by convention.
/// - [`AnystructError::InvalidTagType`] for the first tag that is not a
///   string.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
///
/// let record = anystruct::of_flat(&[json!("n"), json!(100), json!("json:\"n\"")])?;
/// assert_eq!(record.tag("n"), Some("json:\"n\""));
///
/// assert!(anystruct::of_flat(&[json!("n"), json!(1), json!("s"), json!("x"), json!(0)]).is_err());
/// # Ok::<_, anystruct::AnystructError>(())
/// ```
pub fn of_flat(args: &[Value]) -> AnystructResult<Record> {
    let grouping = Grouping::detect(args.len())?;
    let width = grouping.width();
    let mut fields = FieldCollection::new();
    for (group, chunk) in args.chunks_exact(width).enumerate() {
        fields.insert(parse_group(chunk, group * width)?);
    }
    Ok(synthesize(fields))
}

/// Parse one group starting at argument `offset`.
fn parse_group(chunk: &[Value], offset: usize) -> AnystructResult<FieldDescriptor> {
    match chunk {
        [name, value] => FieldDescriptor::from_json(expect_name(name)?, value.clone()),
        [name, value, tag] => {
            let descriptor = FieldDescriptor::from_json(expect_name(name)?, value.clone())?;
            let Value::String(text) = tag else {
                return Err(AnystructError::InvalidTagType {
                    index: offset + 2,
                    found: FieldType::of_value(tag),
                });
            };
            Ok(descriptor.with_tag(text.as_str()))
        }
        _ => Err(AnystructError::InvalidDescriptorArity { len: chunk.len() }),
    }
}

fn expect_name(name: &Value) -> AnystructResult<&str> {
    name.as_str()
        .ok_or_else(|| AnystructError::InvalidFieldName {
            name: name.to_string(),
            reason: NameViolation::NotAString,
        })
}
