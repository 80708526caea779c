//! Remodel Core - Plan-driven translation between model schemas
//!
//! This crate converts an instance of one schema into an instance of another
//! according to an ordered, per-property translation plan, and can synthesize
//! such plans from a model's schema descriptor.
//!
//! # Main Components
//!
//! - **Property Access**: [`Source`] reads named properties from typed models,
//!   generic records and JSON values
//! - **Introspection**: [`introspect`] derives constructor parameters from a
//!   [`Schema`]
//! - **Translation Engine**: [`Mapper`] executes a [`Plan`] of [`Translation`]s
//! - **Magic Mappers**: [`dict_mapper`] and [`dict_schema`] build plans for
//!   model/record conversions
//! - **Plan Documents**: [`declarative`] loads plans from serialized documents
//!
//! # Example
//!
//! ```
//! use remodel_core::{dict_mapper, dict_schema, Model, Schema};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Penguin {
//!     name: String,
//!     mood: String,
//!     id: Option<u64>,
//! }
//!
//! impl Model for Penguin {
//!     fn schema() -> Schema {
//!         Schema::new("Penguin").scalar("name").scalar("mood").scalar("id")
//!     }
//! }
//!
//! # fn example() -> remodel_core::Result<()> {
//! let penny = Penguin { name: "penny".into(), mood: "fat".into(), id: None };
//! let record = dict_mapper::<Penguin>()?.map(&penny)?;
//! let back = dict_schema::<Penguin>()?.map(&record)?;
//! assert_eq!(back, penny);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod accessor;
pub mod declarative;
pub mod error;
pub mod introspect;
pub mod model;
pub mod translation;

// Re-export main types for convenience
pub use accessor::Source;
pub use error::{Error, Result};
pub use introspect::{parameters, parameters_of, Parameter, Parameters, IDENTITY_PARAMETER};
pub use model::{Field, FieldKind, Model, NestedSchema, Record, Schema};
pub use translation::built_in::{
    identity, make_constructor, make_constructor_for, make_projection, make_projection_for,
    make_rotation, DEFAULT_SEPARATOR,
};
pub use translation::{
    dict_mapper, dict_mapper_for, dict_schema, dict_schema_for, DictSchemaBuilder, GroupKey,
    Mapper, Plan, PlanEntry, Target, Translation,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
