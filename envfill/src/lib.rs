//! # envfill
//!
//! Populate configuration structs from a local `.env` file or from the
//! process environment, matching values to fields by name.
//!
//! Loading works in one pass:
//!
//! - The environment file path is `<current dir>/.env`, or `<current dir>/<name>`
//!   when a file name override is given.
//! - If that file exists, every `KEY=VALUE` line in it becomes a value.
//! - Otherwise each field name of the record is looked up as an environment
//!   variable; unset variables yield an empty string.
//! - Values are written into the record's `String` fields by name. A value
//!   aimed at a field of any other type is an error.
//!
//! Record types describe their fields through the [`Record`] trait, usually
//! derived with `#[derive(Record)]` (enabled by the default `derive` feature).
//!
//! ## File format
//!
//! One `KEY=VALUE` per line, no comments, quoting, or escaping. A line that
//! does not split into exactly two parts on `=` is taken as a key with an
//! empty value, so `TOKEN=abc==` yields the key `TOKEN=abc==`.
//!
//! ## Examples
//!
//! ```no_run
//! # #[cfg(feature = "derive")]
//! # {
//! use envfill::Record;
//!
//! #[derive(Debug, Default, Record)]
//! struct Config {
//!     #[envfill(rename = "DATABASE_URL")]
//!     database_url: String,
//!     #[envfill(rename = "API_KEY")]
//!     api_key: String,
//! }
//!
//! fn main() -> envfill::Result<()> {
//!     let mut config = Config::default();
//!     envfill::load(&mut config, None)?;
//!     println!("{:?}", config);
//!     Ok(())
//! }
//! # }
//! ```

pub mod assign;
pub mod builder;
pub mod discovery;
pub mod error;
pub mod record;
pub mod source;

pub use builder::Loader;
pub use error::{Error, Result};
pub use record::Record;
pub use source::{EnvSource, FileSource, MemorySource, Source, ValueMap};

// Re-export the derive macro when the feature is enabled
#[cfg(feature = "derive")]
pub use envfill_derive::Record;

/// Load `record` from `.env` (or `file_name`) in the current directory,
/// falling back to the process environment.
///
/// # Arguments
///
/// * `record` - The struct to populate
/// * `file_name` - Environment file name to use instead of `.env`
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "derive")]
/// # {
/// #[derive(Default, envfill::Record)]
/// #[allow(non_snake_case)]
/// struct Config {
///     HOST: String,
/// }
///
/// let mut config = Config::default();
/// envfill::load(&mut config, Some("local.env")).unwrap();
/// # }
/// ```
pub fn load<R: Record>(record: &mut R, file_name: Option<&str>) -> Result<()> {
    default_loader(file_name).load(record)
}

/// Like [`load`], but fails with [`Error::NilReference`] when `record` is `None`.
pub fn load_into<R: Record>(record: Option<&mut R>, file_name: Option<&str>) -> Result<()> {
    default_loader(file_name).load_into(record)
}

fn default_loader(file_name: Option<&str>) -> Loader {
    match file_name {
        Some(name) => Loader::new().with_file_name(name),
        None => Loader::new(),
    }
}
