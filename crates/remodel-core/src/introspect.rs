//! Constructor signature introspection
//!
//! Derives the ordered parameter set of a model from its [`Schema`] descriptor
//! and binds argument sets against it. A parameter named `id` is optional
//! everywhere and defaults to `null` when no plan entry supplies it.

use crate::model::{FieldKind, Model, Record, Schema};
use crate::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Name of the identity parameter
pub const IDENTITY_PARAMETER: &str = "id";

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether `name` parses as an identifier
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
        .is_match(name)
}

/// One constructor parameter
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub required: bool,
    pub kind: FieldKind,
}

/// Ordered constructor parameters of a model
#[derive(Debug, Clone)]
pub struct Parameters {
    model: String,
    entries: Vec<Parameter>,
}

impl Parameters {
    /// Name of the model these parameters belong to
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|p| p.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.entries.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether any parameter must be supplied by a plan
    pub fn has_required(&self) -> bool {
        self.entries.iter().any(|p| p.required)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check an argument set against these parameters.
    ///
    /// Rejects unknown parameters and missing required ones, defaults an absent
    /// `id` to `null`, and returns the arguments in declaration order.
    pub fn bind(&self, mut args: Record) -> Result<Record> {
        if let Some(unknown) = args.keys().find(|key| !self.contains(key)) {
            return Err(Error::construction(
                &self.model,
                Some(unknown.as_str()),
                format!("'{}' is not a parameter of {}", unknown, self.model),
            ));
        }

        let mut bound = Record::new();
        for parameter in &self.entries {
            match args.remove(&parameter.name) {
                Some(value) => {
                    bound.insert(parameter.name.clone(), value);
                }
                None if parameter.name == IDENTITY_PARAMETER => {
                    bound.insert(parameter.name.clone(), Value::Null);
                }
                None if parameter.required => {
                    return Err(Error::construction(
                        &self.model,
                        Some(parameter.name.as_str()),
                        format!("required parameter '{}' has no value", parameter.name),
                    ));
                }
                None => {}
            }
        }

        Ok(bound)
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Determine the constructor parameters described by `schema`
pub fn parameters_of(schema: &Schema) -> Result<Parameters> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        if !is_identifier(&field.name) {
            return Err(Error::Introspection {
                model: schema.name().to_string(),
                message: format!("field '{}' is not a named parameter", field.name),
            });
        }
        if !seen.insert(field.name.as_str()) {
            return Err(Error::Introspection {
                model: schema.name().to_string(),
                message: format!("field '{}' is declared more than once", field.name),
            });
        }

        entries.push(Parameter {
            name: field.name.clone(),
            required: field.required && field.name != IDENTITY_PARAMETER,
            kind: field.kind.clone(),
        });
    }

    log::trace!("{} takes {} parameters", schema.name(), entries.len());

    Ok(Parameters {
        model: schema.name().to_string(),
        entries,
    })
}

/// Constructor parameters of a typed model
pub fn parameters<T: Model>() -> Result<Parameters> {
    parameters_of(&T::schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use serde_json::json;

    fn penguin() -> Schema {
        Schema::new("Penguin").scalar("name").scalar("mood").scalar("id")
    }

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_identity_parameter_is_optional() {
        let params = parameters_of(&penguin()).unwrap();
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["name", "mood", "id"]);
        assert!(params.get("name").unwrap().required);
        assert!(!params.get("id").unwrap().required);
    }

    #[test]
    fn test_bind_defaults_id_and_orders_arguments() {
        let params = parameters_of(&penguin()).unwrap();
        let bound = params.bind(record(json!({"mood": "fat", "name": "penny"}))).unwrap();
        assert_eq!(Value::Object(bound.clone()), json!({"name": "penny", "mood": "fat", "id": null}));
        assert_eq!(bound.keys().collect::<Vec<_>>(), vec!["name", "mood", "id"]);
    }

    #[test]
    fn test_bind_rejects_missing_required() {
        let params = parameters_of(&penguin()).unwrap();
        let err = params.bind(record(json!({"name": "penny"}))).unwrap_err();
        assert_eq!(err.property(), Some("mood"));
        assert!(matches!(err, Error::Construction { .. }));
    }

    #[test]
    fn test_bind_rejects_unknown_parameter() {
        let params = parameters_of(&penguin()).unwrap();
        let err = params
            .bind(record(json!({"name": "penny", "mood": "fat", "wings": 2})))
            .unwrap_err();
        assert_eq!(err.property(), Some("wings"));
    }

    #[test]
    fn test_optional_parameter_may_be_absent() {
        let schema = Schema::new("Note").scalar("text").field(Field::scalar("tag").optional());
        let params = parameters_of(&schema).unwrap();
        let bound = params.bind(record(json!({"text": "hi"}))).unwrap();
        assert_eq!(Value::Object(bound), json!({"text": "hi"}));
    }

    #[test]
    fn test_unnamed_fields_fail_introspection() {
        let schema = Schema::new("Tuple").scalar("0").scalar("1");
        let err = parameters_of(&schema).unwrap_err();
        assert!(matches!(err, Error::Introspection { .. }));

        let schema = Schema::new("Twice").scalar("a").scalar("a");
        assert!(parameters_of(&schema).is_err());
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_identifier("favorite_penguin"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }
}
