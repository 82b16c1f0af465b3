//! Field-descriptor tables for configuration records.
//!
//! A record describes its fields through [`Record::shape`], returning one
//! [`Field`] per populatable field in declaration order. Each field carries
//! the key it is looked up under and a [`FieldKind`] saying whether a string
//! can be stored in it. The table is usually generated with
//! `#[derive(Record)]`, but can be written by hand:
//!
//! ```
//! use envfill::record::{Field, Record, Shape};
//!
//! #[derive(Default)]
//! struct Database {
//!     url: String,
//!     pool_size: u32,
//! }
//!
//! impl Record for Database {
//!     fn shape() -> Shape<Self> {
//!         Shape::Struct(vec![
//!             Field::text("DATABASE_URL", |r: &mut Self, v| r.url = v),
//!             Field::unsupported("pool_size", "u32"),
//!         ])
//!     }
//! }
//!
//! let names = envfill::record::field_names::<Database>().unwrap();
//! assert_eq!(names, vec!["DATABASE_URL", "pool_size"]);
//! ```

use crate::error::{Error, Result};

/// Stores a looked-up value into one field of a record.
pub type Setter<R> = fn(&mut R, String);

/// What a field can hold.
pub enum FieldKind<R> {
    /// A string field, written through its setter.
    Text(Setter<R>),
    /// Any other field type. Assigning a value to it is an error.
    Unsupported { type_name: &'static str },
}

/// A single entry of a record's field-descriptor table.
pub struct Field<R> {
    /// Key used to look the field up in a value map.
    pub name: &'static str,
    pub kind: FieldKind<R>,
}

impl<R> Field<R> {
    /// Describe a string field.
    pub fn text(name: &'static str, setter: Setter<R>) -> Self {
        Self {
            name,
            kind: FieldKind::Text(setter),
        }
    }

    /// Describe a field whose type cannot hold a string value.
    pub fn unsupported(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Unsupported { type_name },
        }
    }
}

/// The layout of a record type.
pub enum Shape<R> {
    /// An aggregate with named fields, in declaration order.
    Struct(Vec<Field<R>>),
    /// A value with no fields to populate, such as a primitive.
    Scalar,
}

/// A type that configuration values can be loaded into.
pub trait Record: Sized {
    /// Build the field-descriptor table for this type.
    fn shape() -> Shape<Self>;

    /// Human-readable type name used in error messages.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! scalar_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn shape() -> Shape<Self> {
                    Shape::Scalar
                }
            }
        )*
    };
}

scalar_record!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Enumerate the field names of `R` in declaration order.
///
/// Fails with [`Error::NotAStruct`] if `R` has no named fields to populate.
pub fn field_names<R: Record>() -> Result<Vec<&'static str>> {
    match R::shape() {
        Shape::Struct(fields) => Ok(fields.iter().map(|f| f.name).collect()),
        Shape::Scalar => Err(Error::NotAStruct(R::type_name().to_string())),
    }
}

/// Ensure a record reference is present.
pub fn validate_pointer<R>(record: Option<&mut R>) -> Result<&mut R> {
    record.ok_or(Error::NilReference)
}
