//! Plan documents
//!
//! A [`PlanDocument`] describes a record-to-record mapper in a serialized form
//! (JSON, YAML or anything else serde reads). Schemas referenced by the
//! document are inline, so the resulting mapper needs no Rust model types.

use crate::model::{Field, FieldKind, NestedSchema, Record, Schema};
use crate::translation::built_in::{
    identity, make_constructor_for, make_projection_for, make_rotation, DEFAULT_SEPARATOR,
};
use crate::translation::{dict_mapper_for, dict_schema_for, GroupKey, Mapper, Plan, PlanEntry, Translation};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How the document's mapper is produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Run the listed entries
    #[default]
    Plan,
    /// Synthesize a record mapper from the `source` schema
    ToDict,
    /// Synthesize a record-to-model mapper from the `target` schema
    FromDict,
}

/// Shape of a field in a schema document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKindDocument {
    #[default]
    Scalar,
    Model,
    List,
}

/// Serialized form of a [`Schema`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

/// Serialized form of a [`Field`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDocument {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKindDocument,
    #[serde(default = "default_required")]
    pub required: bool,
    /// Nested schema, for `model` and `list` fields
    #[serde(default)]
    pub schema: Option<SchemaDocument>,
}

fn default_required() -> bool {
    true
}

impl SchemaDocument {
    /// Materialize the described schema
    pub fn to_schema(&self) -> Result<Schema> {
        let mut schema = Schema::new(&self.name);

        for field in &self.fields {
            let kind = match (field.kind, &field.schema) {
                (FieldKindDocument::Scalar, _) => FieldKind::Scalar,
                (FieldKindDocument::Model, Some(nested)) => {
                    FieldKind::Model(NestedSchema::Inline(Arc::new(nested.to_schema()?)))
                }
                (FieldKindDocument::List, Some(nested)) => {
                    FieldKind::List(NestedSchema::Inline(Arc::new(nested.to_schema()?)))
                }
                (_, None) => {
                    return Err(Error::Introspection {
                        model: self.name.clone(),
                        message: format!("field '{}' holds a nested model but declares no schema", field.name),
                    });
                }
            };

            let built = Field::with_kind(&field.name, kind);
            schema = schema.field(if field.required { built } else { built.optional() });
        }

        Ok(schema)
    }
}

/// A group key written as one name or a list of names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupDocument {
    Single(String),
    Tuple(Vec<String>),
}

impl From<GroupDocument> for GroupKey {
    fn from(group: GroupDocument) -> Self {
        match group {
            GroupDocument::Single(name) => GroupKey::single(name),
            GroupDocument::Tuple(names) => GroupKey::tuple(names),
        }
    }
}

/// Serialized form of a built-in translation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranslationDocument {
    Identity,
    Rotation {
        to: String,
    },
    Projection {
        schema: SchemaDocument,
        #[serde(default)]
        separator: Option<String>,
    },
    Constructor {
        prefix: String,
        schema: SchemaDocument,
        #[serde(default)]
        separator: Option<String>,
    },
}

impl Default for TranslationDocument {
    fn default() -> Self {
        TranslationDocument::Identity
    }
}

impl TranslationDocument {
    fn to_translation(&self, default_separator: &str) -> Result<Translation> {
        let separator = |own: &Option<String>| own.clone().unwrap_or_else(|| default_separator.to_string());

        Ok(match self {
            TranslationDocument::Identity => identity(),
            TranslationDocument::Rotation { to } => make_rotation(to),
            TranslationDocument::Projection { schema, separator: own } => {
                make_projection_for(schema.to_schema()?, separator(own))
            }
            TranslationDocument::Constructor {
                prefix,
                schema,
                separator: own,
            } => make_constructor_for(schema.to_schema()?, prefix, separator(own)),
        })
    }
}

/// One plan entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryDocument {
    pub group: GroupDocument,
    #[serde(default)]
    pub translation: TranslationDocument,
    #[serde(default)]
    pub optional: bool,
}

/// A complete serialized mapper description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanDocument {
    #[serde(default)]
    pub mode: Mode,
    /// Shape of the mapped records; enables parameter validation
    #[serde(default)]
    pub target: Option<SchemaDocument>,
    /// Shape of the input records, for `to_dict`
    #[serde(default)]
    pub source: Option<SchemaDocument>,
    /// Separator used by projections and constructors that set none
    #[serde(default)]
    pub separator: Option<String>,
    #[serde(default)]
    pub entries: Vec<EntryDocument>,
}

impl PlanDocument {
    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the described mapper
    pub fn into_mapper(self) -> Result<Mapper<Record>> {
        match self.mode {
            Mode::Plan => self.plan_mapper(),
            Mode::ToDict => {
                let source = self.source.ok_or_else(|| {
                    Error::invalid_plan("mapping", "to_dict documents need a source schema")
                })?;
                dict_mapper_for(&source.to_schema()?)
            }
            Mode::FromDict => {
                let target = self.target.ok_or_else(|| {
                    Error::invalid_plan("mapping", "from_dict documents need a target schema")
                })?;
                dict_schema_for(target.to_schema()?)
            }
        }
    }

    fn plan_mapper(self) -> Result<Mapper<Record>> {
        let separator = self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);

        let mut plan = Plan::new();
        for entry in &self.entries {
            let translation = entry.translation.to_translation(separator)?;
            let built = PlanEntry::new(GroupKey::from(entry.group.clone()), translation);
            plan.push(if entry.optional { built.optional() } else { built });
        }

        log::debug!("Loaded plan document with {} entries", plan.len());

        match &self.target {
            Some(target) => Mapper::with_schema(target.to_schema()?, plan),
            None => Mapper::new(plan),
        }
    }
}
