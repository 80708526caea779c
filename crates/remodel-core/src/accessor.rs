//! Uniform read access to model properties
//!
//! A [`Source`] is anything the mapper can read named properties from: a typed
//! [`Model`], a generic [`Record`], or a bare JSON value. The mapper takes one
//! property view per `map` call and extracts every group from it.

use crate::model::{Model, Record};
use crate::{Error, Result};
use serde_json::Value;
use std::borrow::Cow;

/// Read-only property view over a model instance
pub trait Source {
    /// Name used when reporting missing properties
    fn model_name(&self) -> Cow<'_, str>;

    /// Named properties exposed by this instance
    fn properties(&self) -> Result<Cow<'_, Record>>;
}

impl Source for Record {
    fn model_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("mapping")
    }

    fn properties(&self) -> Result<Cow<'_, Record>> {
        Ok(Cow::Borrowed(self))
    }
}

impl Source for Value {
    fn model_name(&self) -> Cow<'_, str> {
        match self {
            Value::Object(_) => Cow::Borrowed("mapping"),
            _ => Cow::Borrowed("value"),
        }
    }

    fn properties(&self) -> Result<Cow<'_, Record>> {
        match self {
            Value::Object(map) => Ok(Cow::Borrowed(map)),
            // Non-object values carry no named properties
            _ => Ok(Cow::Owned(Record::new())),
        }
    }
}

impl<T: Model> Source for T {
    fn model_name(&self) -> Cow<'_, str> {
        Cow::Owned(T::schema().name().to_string())
    }

    fn properties(&self) -> Result<Cow<'_, Record>> {
        let schema = T::schema();
        let mut serialized = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Record::new(),
        };

        // Only declared fields count as properties of a typed model
        let mut declared = Record::new();
        for name in schema.field_names() {
            if let Some(value) = serialized.remove(name) {
                declared.insert(name.to_string(), value);
            }
        }

        Ok(Cow::Owned(declared))
    }
}

/// Read one property, failing with `MissingProperty` when it is absent
pub fn get(properties: &Record, name: &str, model: &str) -> Result<Value> {
    properties
        .get(name)
        .cloned()
        .ok_or_else(|| Error::missing_property(name, model))
}

/// Build the ordered sub-record for a property group
pub fn extract(properties: &Record, names: &[String], model: &str) -> Result<Record> {
    let mut group = Record::new();
    for name in names {
        group.insert(name.clone(), get(properties, name, model)?);
    }
    Ok(group)
}

/// Like [`extract`], but yields `None` when any property is absent
pub fn try_extract(properties: &Record, names: &[String]) -> Option<Record> {
    let mut group = Record::new();
    for name in names {
        group.insert(name.clone(), properties.get(name)?.clone());
    }
    Some(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Schema;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Badge {
        label: String,
        secret: String,
    }

    impl Model for Badge {
        fn schema() -> Schema {
            Schema::new("Badge").scalar("label")
        }
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_record_source_reads_keys() {
        let record = json!({"a": 1, "b": "two"}).as_object().cloned().unwrap();
        let props = record.properties().unwrap();
        assert_eq!(get(&props, "b", "mapping").unwrap(), json!("two"));
    }

    #[test]
    fn test_missing_property_names_the_property() {
        let record = Record::new();
        let err = get(&record, "z", "mapping").unwrap_err();
        match err {
            Error::MissingProperty { property, model } => {
                assert_eq!(property, "z");
                assert_eq!(model, "mapping");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_model_source_exposes_declared_fields_only() {
        let badge = Badge {
            label: "gold".to_string(),
            secret: "hidden".to_string(),
        };
        let props = badge.properties().unwrap();
        assert_eq!(props.get("label"), Some(&json!("gold")));
        assert!(props.get("secret").is_none());
        assert_eq!(badge.model_name(), "Badge");
    }

    #[test]
    fn test_non_object_value_has_no_properties() {
        let value = json!(42);
        assert!(value.properties().unwrap().is_empty());
        assert_eq!(value.model_name(), "value");
    }

    #[test]
    fn test_extract_preserves_group_order() {
        let record = json!({"a": 1, "b": 2, "c": 3}).as_object().cloned().unwrap();
        let group = extract(&record, &names(&["c", "a"]), "mapping").unwrap();
        let keys: Vec<&String> = group.keys().collect();
        assert_eq!(keys, vec!["c", "a"]);

        assert!(try_extract(&record, &names(&["a", "z"])).is_none());
        assert!(extract(&record, &names(&["a", "z"]), "mapping").is_err());
    }
}
