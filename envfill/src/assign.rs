//! Writing looked-up values into a record.

use crate::error::{Error, Result};
use crate::record::{FieldKind, Record, Shape};
use crate::source::ValueMap;

/// Assign every field of `record` that has an entry in `values`.
///
/// Fields are visited in declaration order. A field with no entry is left
/// untouched. Stops at the first field whose type cannot hold a string;
/// fields assigned before it keep their new values.
pub fn assign<R: Record>(record: &mut R, values: &ValueMap) -> Result<()> {
    let fields = match R::shape() {
        Shape::Struct(fields) => fields,
        Shape::Scalar => return Err(Error::NotAStruct(R::type_name().to_string())),
    };

    for field in fields {
        let Some(value) = values.get(field.name) else {
            tracing::trace!(field = field.name, "no value, skipping");
            continue;
        };

        match field.kind {
            FieldKind::Text(set) => {
                set(record, value.clone());
                tracing::trace!(field = field.name, "assigned");
            }
            FieldKind::Unsupported { type_name } => {
                return Err(Error::UnsupportedFieldType {
                    field: field.name.to_string(),
                    type_name: type_name.to_string(),
                });
            }
        }
    }

    Ok(())
}
