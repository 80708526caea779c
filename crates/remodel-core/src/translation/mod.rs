//! Plan-driven translation between models
//!
//! A [`Mapper`] runs an ordered [`Plan`] of (group key, [`Translation`]) entries
//! against a source and constructs its target from the merged output.
//!
//! # Module Organization
//!
//! - [`types`] - Group keys, translation functions and their declared outputs
//! - [`plan`] - Plans and plan validation
//! - [`built_in`] - Identity, rotation, projection and constructor translations
//! - [`mapper`] - The execution engine and the [`Target`] trait
//! - [`magic`] - Mappers synthesized from model schemas
//!
//! # Examples
//!
//! ```
//! use remodel_core::translation::{built_in, Mapper, Plan};
//! use remodel_core::Record;
//! use serde_json::json;
//!
//! let plan = Plan::new()
//!     .add("name", built_in::make_rotation("title"))
//!     .add("mood", built_in::identity());
//! let mapper = Mapper::<Record>::new(plan).unwrap();
//!
//! let out = mapper.map(&json!({"name": "penny", "mood": "fat"})).unwrap();
//! assert_eq!(serde_json::Value::Object(out), json!({"title": "penny", "mood": "fat"}));
//! ```
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

pub mod built_in;
pub mod magic;
pub mod mapper;
pub mod plan;
pub mod types;


pub use magic::{dict_mapper, dict_mapper_for, dict_schema, dict_schema_for, DictSchemaBuilder};
pub use mapper::{Mapper, Target};
pub use plan::{Plan, PlanEntry};
pub use types::{GroupKey, Outputs, Translation, TranslationFn};
