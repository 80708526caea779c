//! Core types for plan-driven translation
//!
//! This module defines group keys and translation functions, along with the
//! output declarations used to validate plans before anything is mapped.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::model::Record;
use crate::Result;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Names of the source properties one translation consumes together
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(Vec<String>);

impl GroupKey {
    /// A group of one property
    pub fn single(name: impl Into<String>) -> Self {
        GroupKey(vec![name.into()])
    }

    /// An ordered tuple of properties
    pub fn tuple<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GroupKey(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single),
            names => write!(f, "({})", names.join(", ")),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(name: &str) -> Self {
        GroupKey::single(name)
    }
}

impl From<String> for GroupKey {
    fn from(name: String) -> Self {
        GroupKey::single(name)
    }
}

impl<const N: usize> From<[&str; N]> for GroupKey {
    fn from(names: [&str; N]) -> Self {
        GroupKey::tuple(names)
    }
}

impl From<Vec<&str>> for GroupKey {
    fn from(names: Vec<&str>) -> Self {
        GroupKey::tuple(names)
    }
}

impl From<Vec<String>> for GroupKey {
    fn from(names: Vec<String>) -> Self {
        GroupKey(names)
    }
}

/// A pure function from a group's properties to target parameters
pub type TranslationFn = dyn Fn(&Record) -> Result<Record> + Send + Sync;

/// Parameters a translation is known to produce
#[derive(Debug, Clone, PartialEq)]
pub enum Outputs {
    /// Not known until the translation runs
    Undeclared,
    /// The group's own property names
    Passthrough,
    /// A fixed set of names
    Fixed(Vec<String>),
    /// `group + separator + field` for every field
    Prefixed { separator: String, fields: Vec<String> },
}

impl Outputs {
    /// Parameter names produced for `group`, when declared
    pub fn resolve(&self, group: &GroupKey) -> Option<Vec<String>> {
        match self {
            Outputs::Undeclared => None,
            Outputs::Passthrough => Some(group.names().to_vec()),
            Outputs::Fixed(names) => Some(names.clone()),
            Outputs::Prefixed { separator, fields } => Some(
                group
                    .names()
                    .iter()
                    .flat_map(|name| fields.iter().map(move |field| format!("{}{}{}", name, separator, field)))
                    .collect(),
            ),
        }
    }
}

/// A translation function plus what plan validation needs to know about it
#[derive(Clone)]
pub struct Translation {
    name: Cow<'static, str>,
    func: Arc<TranslationFn>,
    outputs: Outputs,
    arity: Option<usize>,
    required_prefix: Option<String>,
}

impl Translation {
    /// Wrap a function; its outputs stay undeclared
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&Record) -> Result<Record> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
            outputs: Outputs::Undeclared,
            arity: None,
            required_prefix: None,
        }
    }

    /// Declare the exact parameters this translation produces
    pub fn with_outputs<I, S>(self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_output_shape(Outputs::Fixed(outputs.into_iter().map(Into::into).collect()))
    }

    pub fn with_output_shape(mut self, outputs: Outputs) -> Self {
        self.outputs = outputs;
        self
    }

    /// Require groups of exactly `arity` properties
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Require every group property name to start with `prefix`
    pub fn with_required_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.required_prefix = Some(prefix.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn required_prefix(&self) -> Option<&str> {
        self.required_prefix.as_deref()
    }

    /// Run the translation on a group's properties
    pub fn apply(&self, properties: &Record) -> Result<Record> {
        (self.func)(properties)
    }
}

impl fmt::Debug for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translation")
            .field("name", &self.name)
            .field("outputs", &self.outputs)
            .field("arity", &self.arity)
            .field("required_prefix", &self.required_prefix)
            .finish_non_exhaustive()
    }
}
