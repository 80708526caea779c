//! Model descriptors
//!
//! A typed model describes its constructor once through a [`Schema`]: an ordered
//! list of named fields, each tagged as a scalar or as a nested model. The
//! introspector and the magic mappers read this descriptor instead of
//! inspecting values at mapping time.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Generic ordered string-keyed mapping.
///
/// Insertion order is preserved, so argument sets and mapper outputs keep the
/// order in which parameters were produced.
pub type Record = serde_json::Map<String, Value>;

/// A typed model the engine can read from and construct.
///
/// Property values travel through serde: a model is read by serializing it and
/// constructed by deserializing its bound argument set.
pub trait Model: Serialize + DeserializeOwned {
    /// Constructor descriptor of this model
    fn schema() -> Schema;
}

/// Reference to the schema of a nested model.
#[derive(Clone)]
pub enum NestedSchema {
    /// Resolved on demand, which keeps self-referential models finite
    Deferred(fn() -> Schema),
    /// Already materialized, e.g. read from a plan document
    Inline(Arc<Schema>),
}

impl NestedSchema {
    /// Materialize the referenced schema
    pub fn resolve(&self) -> Schema {
        match self {
            NestedSchema::Deferred(schema) => schema(),
            NestedSchema::Inline(schema) => Schema::clone(schema),
        }
    }
}

impl fmt::Debug for NestedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestedSchema::Deferred(_) => write!(f, "Deferred(..)"),
            NestedSchema::Inline(schema) => write!(f, "Inline({})", schema.name()),
        }
    }
}

/// Shape of the value a field holds
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Any value that is not itself a model
    Scalar,
    /// A nested model instance
    Model(NestedSchema),
    /// A sequence of nested model instances
    List(NestedSchema),
}

/// One named constructor parameter of a model
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    /// A required scalar field
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar,
            required: true,
        }
    }

    /// A required field holding a nested model
    pub fn model(name: impl Into<String>, schema: fn() -> Schema) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Model(NestedSchema::Deferred(schema)),
            required: true,
        }
    }

    /// A required field holding a list of nested models
    pub fn list(name: impl Into<String>, schema: fn() -> Schema) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::List(NestedSchema::Deferred(schema)),
            required: true,
        }
    }

    /// Field of the given kind, used when schemas are built at runtime
    pub fn with_kind(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    /// Mark the field as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Schema of the nested model, if the field holds one
    pub fn nested(&self) -> Option<&NestedSchema> {
        match &self.kind {
            FieldKind::Scalar => None,
            FieldKind::Model(nested) | FieldKind::List(nested) => Some(nested),
        }
    }
}

/// Constructor descriptor of a model
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    /// Create a schema with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a required scalar field
    pub fn scalar(self, name: impl Into<String>) -> Self {
        self.field(Field::scalar(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
