//! Built-in translations for common plan entries
//!
//! These factories never fail. Any problem with the data surfaces when the
//! returned translation runs inside a mapper.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use super::mapper::Target;
use super::types::{Outputs, Translation};
use crate::accessor;
use crate::introspect::{parameters, parameters_of};
use crate::model::{Model, Record, Schema};
use crate::{Error, Result};
use serde_json::Value;

/// Separator placed between a group name and a nested field name
pub const DEFAULT_SEPARATOR: &str = "_";

/// Pass the group's properties through as same-named parameters
pub fn identity() -> Translation {
    Translation::new("identity", |properties: &Record| Ok(properties.clone()))
        .with_output_shape(Outputs::Passthrough)
}

/// Rename a single property to `target`
pub fn make_rotation(target: impl Into<String>) -> Translation {
    let target = target.into();
    let declared = target.clone();

    Translation::new("rotation", move |properties: &Record| {
        let mut out = Record::new();
        if let Some(value) = properties.values().next() {
            out.insert(target.clone(), value.clone());
        }
        Ok(out)
    })
    .with_outputs([declared])
    .with_arity(1)
}

/// Flatten a nested `V` instance into `group + separator + field` parameters
pub fn make_projection<V: Model>(separator: impl Into<String>) -> Translation {
    make_projection_for(V::schema(), separator)
}

/// Flatten a nested model described by `schema`
pub fn make_projection_for(schema: Schema, separator: impl Into<String>) -> Translation {
    let separator = separator.into();
    let model = schema.name().to_string();
    let fields: Vec<String> = schema.field_names().map(str::to_string).collect();
    let outputs = Outputs::Prefixed {
        separator: separator.clone(),
        fields: fields.clone(),
    };

    Translation::new("projection", move |properties: &Record| {
        let mut out = Record::new();
        for (group_name, value) in properties {
            let nested = value.as_object().ok_or_else(|| {
                Error::construction(
                    &model,
                    Some(group_name.as_str()),
                    format!("'{}' holds {} rather than a {} instance", group_name, describe(value), model),
                )
            })?;

            for field in &fields {
                let name = format!("{}{}{}", group_name, separator, field);
                out.insert(name, accessor::get(nested, field, &model)?);
            }
        }
        Ok(out)
    })
    .with_output_shape(outputs)
    .with_arity(1)
}

/// Rebuild a nested `N` from `prefix + separator` properties; the inverse of
/// [`make_projection`]
pub fn make_constructor<N: Model + 'static>(prefix: impl Into<String>, separator: impl Into<String>) -> Translation {
    prefixed_constructor(prefix.into(), separator.into(), |args| {
        let bound = parameters::<N>()?.bind(args)?;
        let instance = N::construct(bound)?;
        Ok(serde_json::to_value(instance)?)
    })
}

/// Rebuild a nested model described by `schema` as a generic record
pub fn make_constructor_for(
    schema: Schema,
    prefix: impl Into<String>,
    separator: impl Into<String>,
) -> Translation {
    prefixed_constructor(prefix.into(), separator.into(), move |args| {
        let bound = parameters_of(&schema)?.bind(args)?;
        Ok(Value::Object(bound))
    })
}

fn prefixed_constructor<F>(prefix: String, separator: String, build: F) -> Translation
where
    F: Fn(Record) -> Result<Value> + Send + Sync + 'static,
{
    let marker = format!("{}{}", prefix, separator);
    let strip = marker.clone();
    let output = prefix.clone();

    Translation::new("constructor", move |properties: &Record| {
        let mut stripped = Record::new();
        for (name, value) in properties {
            let field = name.strip_prefix(strip.as_str()).unwrap_or(name);
            stripped.insert(field.to_string(), value.clone());
        }

        let mut out = Record::new();
        out.insert(output.clone(), build(stripped)?);
        Ok(out)
    })
    .with_outputs([prefix])
    .with_required_prefix(marker)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
