//! Mappers whose plans are synthesized from a schema
//!
//! [`dict_mapper`] turns typed models into generic records, following nested
//! model fields recursively. [`dict_schema`] goes the other way; nesting there
//! is wired explicitly per key through [`DictSchemaBuilder::nested`], since a
//! generic record carries no type information to infer it from.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use super::built_in::identity;
use super::mapper::{Mapper, Target};
use super::plan::{Plan, PlanEntry};
use super::types::{Outputs, Translation};
use crate::introspect::parameters_of;
use crate::model::{FieldKind, Model, NestedSchema, Record, Schema};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Mapper from `T` instances to generic records
pub fn dict_mapper<T: Model>() -> Result<Mapper<Record>> {
    dict_mapper_for(&T::schema())
}

/// Mapper from instances described by `schema` to generic records
pub fn dict_mapper_for(schema: &Schema) -> Result<Mapper<Record>> {
    let parameters = parameters_of(schema)?;
    let mut plan = Plan::new();

    for parameter in &parameters {
        let translation = match &parameter.kind {
            FieldKind::Scalar => identity(),
            FieldKind::Model(nested) => nested_to_dict(nested.clone(), false),
            FieldKind::List(nested) => nested_to_dict(nested.clone(), true),
        };

        let entry = PlanEntry::new(parameter.name.as_str(), translation);
        plan.push(if parameter.required { entry } else { entry.optional() });
    }

    log::debug!("Synthesized record plan for {} with {} entries", schema.name(), plan.len());
    Mapper::new(plan)
}

/// Recursively map nested model values to records.
///
/// The nested mapper is built when a value is seen, so self-referential
/// schemas only recurse as deep as the data does.
fn nested_to_dict(nested: NestedSchema, list: bool) -> Translation {
    Translation::new("nested_record", move |properties: &Record| {
        let mut out = Record::new();
        for (name, value) in properties {
            let mapped = match value {
                Value::Null => Value::Null,
                Value::Array(items) if list => {
                    let mapper = dict_mapper_for(&nested.resolve())?;
                    let records = items
                        .iter()
                        .map(|item| mapper.map(item).map(Value::Object))
                        .collect::<Result<Vec<_>>>()?;
                    Value::Array(records)
                }
                Value::Object(_) if !list => Value::Object(dict_mapper_for(&nested.resolve())?.map(value)?),
                _ => {
                    let expected = if list { "a list of models" } else { "a model" };
                    return Err(Error::construction(
                        "mapping",
                        Some(name.as_str()),
                        format!("'{}' does not hold {}", name, expected),
                    ));
                }
            };
            out.insert(name.clone(), mapped);
        }
        Ok(out)
    })
    .with_output_shape(Outputs::Passthrough)
}

/// Mapper from generic records to `T` instances, without nested wiring
pub fn dict_schema<T: Model>() -> Result<Mapper<T>> {
    DictSchemaBuilder::<T>::new().build()
}

/// Mapper from generic records to records shaped by `schema`
pub fn dict_schema_for(schema: Schema) -> Result<Mapper<Record>> {
    DictSchemaBuilder::<Record>::new().build_for(schema)
}

/// Builder for record-to-model mappers with nested mappers wired per key
pub struct DictSchemaBuilder<T> {
    nested: Vec<(String, Translation)>,
    _target: PhantomData<fn() -> T>,
}

impl<T: Target> DictSchemaBuilder<T> {
    pub fn new() -> Self {
        Self {
            nested: Vec::new(),
            _target: PhantomData,
        }
    }

    /// Map the value under `key` with `mapper`; a later call for the same key
    /// replaces the earlier one
    pub fn nested<N>(mut self, key: impl Into<String>, mapper: Mapper<N>) -> Self
    where
        N: Target + Serialize + 'static,
    {
        let key = key.into();
        self.nested.retain(|(existing, _)| *existing != key);
        self.nested.push((key, nested_from_dict(mapper)));
        self
    }

    /// Build the mapper for `T`'s own schema
    pub fn build(self) -> Result<Mapper<T>> {
        let schema = T::target_schema().ok_or_else(|| Error::Introspection {
            model: "mapping".to_string(),
            message: "target type does not describe its parameters".to_string(),
        })?;
        let plan = self.synthesize(&schema)?;
        Mapper::new(plan)
    }

    /// Build the mapper for a target described at runtime
    pub fn build_for(self, schema: Schema) -> Result<Mapper<T>> {
        let plan = self.synthesize(&schema)?;
        Mapper::with_schema(schema, plan)
    }

    fn synthesize(self, schema: &Schema) -> Result<Plan> {
        let parameters = parameters_of(schema)?;

        if let Some((key, _)) = self.nested.iter().find(|(key, _)| !parameters.contains(key)) {
            return Err(Error::invalid_plan(
                schema.name(),
                format!("nested mapper wired to '{}', which is not a parameter of {}", key, schema.name()),
            ));
        }

        let mut plan = Plan::new();
        for parameter in &parameters {
            let translation = self
                .nested
                .iter()
                .find(|(key, _)| *key == parameter.name)
                .map(|(_, translation)| translation.clone())
                .unwrap_or_else(identity);

            let entry = PlanEntry::new(parameter.name.as_str(), translation);
            plan.push(if parameter.required { entry } else { entry.optional() });
        }

        log::debug!(
            "Synthesized {} plan with {} entries, {} nested",
            schema.name(),
            plan.len(),
            self.nested.len()
        );
        Ok(plan)
    }
}

impl<T: Target> Default for DictSchemaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn nested_from_dict<N>(mapper: Mapper<N>) -> Translation
where
    N: Target + Serialize + 'static,
{
    let name = format!("nested_{}", mapper.target_name());
    Translation::new(name, move |properties: &Record| {
        let mut out = Record::new();
        for (key, value) in properties {
            let mapped = match value {
                Value::Null => Value::Null,
                value => serde_json::to_value(mapper.map(value)?)?,
            };
            out.insert(key.clone(), mapped);
        }
        Ok(out)
    })
    .with_output_shape(Outputs::Passthrough)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use serde_json::json;

    fn inner() -> Schema {
        Schema::new("Inner").scalar("a").scalar("b")
    }

    fn outer() -> Schema {
        Schema::new("Outer")
            .scalar("label")
            .field(Field::model("inner", inner))
            .field(Field::list("items", inner).optional())
    }

    fn node() -> Schema {
        Schema::new("Node").scalar("value").field(Field::model("next", node).optional())
    }

    #[test]
    fn test_dict_mapper_recurses_into_models_and_lists() {
        let mapper = dict_mapper_for(&outer()).unwrap();
        let source = json!({
            "label": "x",
            "inner": {"a": 1, "b": 2, "extra": true},
            "items": [{"a": 3, "b": 4}]
        });

        let out = mapper.map(&source).unwrap();
        assert_eq!(
            Value::Object(out),
            json!({"label": "x", "inner": {"a": 1, "b": 2}, "items": [{"a": 3, "b": 4}]})
        );
    }

    #[test]
    fn test_dict_mapper_skips_absent_optional_fields() {
        let mapper = dict_mapper_for(&outer()).unwrap();
        let out = mapper.map(&json!({"label": "x", "inner": null})).unwrap();
        assert_eq!(Value::Object(out), json!({"label": "x", "inner": null}));
    }

    #[test]
    fn test_self_referential_schema_terminates() {
        let mapper = dict_mapper_for(&node()).unwrap();
        let source = json!({"value": 1, "next": {"value": 2, "next": {"value": 3, "next": null}}});
        assert_eq!(Value::Object(mapper.map(&source).unwrap()), source);
    }

    #[test]
    fn test_dict_mapper_rejects_scalar_in_model_field() {
        let mapper = dict_mapper_for(&outer()).unwrap();
        let err = mapper.map(&json!({"label": "x", "inner": 5})).unwrap_err();
        assert_eq!(err.property(), Some("inner"));
    }

    #[test]
    fn test_dict_schema_for_binds_parameters() {
        let mapper = dict_schema_for(inner()).unwrap();
        let out = mapper.map(&json!({"b": 2, "a": 1, "ignored": 0})).unwrap();
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["a", "b"]);

        let err = mapper.map(&json!({"a": 1})).unwrap_err();
        assert!(matches!(err, Error::MissingProperty { ref property, .. } if property == "b"));
    }

    #[test]
    fn test_nested_key_must_be_a_parameter() {
        let nested = dict_schema_for(inner()).unwrap();
        let err = DictSchemaBuilder::<Record>::new()
            .nested("nope", nested)
            .build_for(outer())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPlan { .. }));
    }

    #[test]
    fn test_record_target_without_schema_cannot_build() {
        let err = DictSchemaBuilder::<Record>::new().build().unwrap_err();
        assert!(matches!(err, Error::Introspection { .. }));
    }
}
