//! Record synthesis: turning collected descriptors into a new record.

use crate::{FieldCollection, FieldDef, Record, Shape};

/// Build a new record whose fields are exactly the collected descriptors,
/// sorted by name.
///
/// Each value is stored only when the field's declared type accepts it;
/// otherwise the field keeps its type's zero value. Every call allocates a
/// fresh [`Shape`], so records never share type identity with earlier
/// calls beyond comparing equal.
#[must_use]
pub fn synthesize(fields: FieldCollection) -> Record {
    if fields.is_empty() {
        return Record::empty();
    }

    let descriptors = fields.into_sorted();
    let mut defs = Vec::with_capacity(descriptors.len());
    let mut values = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let (name, declared_type, tag, value) = descriptor.into_parts();
        let stored = if declared_type.accepts(&value) {
            value
        } else {
            tracing::debug!(
                field = %name,
                declared = %declared_type,
                found = %crate::FieldType::of_value(&value),
                "value not assignable; leaving zero value"
            );
            declared_type.zero_value()
        };
        defs.push(FieldDef::new(name, declared_type, tag));
        values.push(stored);
    }
    tracing::trace!(fields = defs.len(), "synthesized record");
    Record::from_parts(Shape::new(defs), values)
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use serde_json::json;

    use super::synthesize;
    use crate::{FieldCollection, FieldType, Record, field, tag};

    #[rstest]
    fn empty_collection_yields_empty_record() {
        let record = synthesize(FieldCollection::new());
        assert!(record.is_empty());
        assert_eq!(record, Record::empty());
    }

    #[rstest]
    fn fields_are_sorted_by_name() -> Result<()> {
        let fields: FieldCollection = [
            field("s", "test", [])?,
            field("N", 100, [])?,
            field("a", true, [])?,
        ]
        .into_iter()
        .collect();
        let record = synthesize(fields);
        let names: Vec<_> = record.names().collect();
        ensure!(names == ["N", "a", "s"], "unexpected order {names:?}");
        Ok(())
    }

    #[rstest]
    fn order_does_not_depend_on_insertion() -> Result<()> {
        let forward = crate::of([field("a", 1, [])?, field("b", 2, [])?]);
        let backward = crate::of([field("b", 2, [])?, field("a", 1, [])?]);
        ensure!(forward == backward, "insertion order leaked into the shape");
        Ok(())
    }

    #[rstest]
    fn unassignable_values_fall_back_to_zero() -> Result<()> {
        let reused = field("n", "not a number", [tag("json:\"n\"")])?
            .with_declared_type(FieldType::Integer);
        let record = synthesize(std::iter::once(reused).collect());
        ensure!(record.get("n") == Some(&json!(0)), "expected the zero value");
        ensure!(
            record.field_type("n") == Some(&FieldType::Integer),
            "declared type should survive"
        );
        ensure!(record.tag("n") == Some("json:\"n\""), "tag should survive");
        Ok(())
    }

    #[rstest]
    fn widened_types_accept_values() -> Result<()> {
        let optional = field("n", 5, [])?.with_declared_type(FieldType::Integer.optional());
        let record = synthesize(std::iter::once(optional).collect());
        ensure!(record.get("n") == Some(&json!(5)), "value should be kept");
        Ok(())
    }

    #[rstest]
    fn identical_shapes_are_independent_values() -> Result<()> {
        let first = crate::of([field("n", 1, [])?]);
        let second = crate::of([field("n", 1, [])?]);
        ensure!(first == second, "equal shapes compare equal");
        ensure!(
            !std::ptr::eq(first.shape(), second.shape()),
            "shapes must not be shared"
        );
        Ok(())
    }
}
