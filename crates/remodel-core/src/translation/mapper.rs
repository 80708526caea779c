//! Plan execution engine
//!
//! A [`Mapper`] owns a validated plan and turns any [`Source`] into an instance
//! of its target type. Each call extracts every group, runs its translation and
//! merges the produced parameters in plan order before constructing the target.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use super::plan::Plan;
use crate::accessor::{self, Source};
use crate::introspect::{parameters_of, Parameters};
use crate::model::{Model, Record, Schema};
use crate::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// A type a mapper can construct from a bound argument set
pub trait Target: Sized {
    /// Constructor descriptor, when the target has a fixed shape
    fn target_schema() -> Option<Schema>;

    /// Build an instance from its argument set
    fn construct(args: Record) -> Result<Self>;
}

/// Generic mappings accept any argument set as-is
impl Target for Record {
    fn target_schema() -> Option<Schema> {
        None
    }

    fn construct(args: Record) -> Result<Self> {
        Ok(args)
    }
}

impl<T: Model> Target for T {
    fn target_schema() -> Option<Schema> {
        Some(T::schema())
    }

    fn construct(args: Record) -> Result<Self> {
        serde_json::from_value(Value::Object(args)).map_err(|e| {
            Error::construction(T::schema().name(), None, e.to_string())
        })
    }
}

/// Executes a translation plan against sources to build `T` instances
pub struct Mapper<T> {
    target: String,
    plan: Plan,
    parameters: Option<Parameters>,
    _target: PhantomData<fn() -> T>,
}

impl<T: Target> Mapper<T> {
    /// Build a mapper for `T` from an explicit plan
    pub fn new(plan: Plan) -> Result<Self> {
        Self::build(T::target_schema(), plan)
    }

    /// Build a mapper whose target shape is described at runtime
    pub fn with_schema(schema: Schema, plan: Plan) -> Result<Self> {
        Self::build(Some(schema), plan)
    }

    fn build(schema: Option<Schema>, plan: Plan) -> Result<Self> {
        let (target, parameters) = match schema {
            Some(schema) => (schema.name().to_string(), Some(parameters_of(&schema)?)),
            None => ("mapping".to_string(), None),
        };

        plan.validate(&target, parameters.as_ref())?;
        log::debug!("Built mapper for {} with {} plan entries", target, plan.len());

        Ok(Self {
            target,
            plan,
            parameters,
            _target: PhantomData,
        })
    }

    /// Map `source` to a new target instance
    pub fn map<S: Source + ?Sized>(&self, source: &S) -> Result<T> {
        let args = self.arguments(source)?;
        T::construct(args)
    }

    /// Run the plan and return the bound argument set without constructing
    pub fn arguments<S: Source + ?Sized>(&self, source: &S) -> Result<Record> {
        let model = source.model_name();
        let properties = source.properties()?;
        let mut args = Record::new();

        for entry in &self.plan {
            let group = if entry.optional {
                match accessor::try_extract(&properties, entry.group.names()) {
                    Some(group) => group,
                    None => {
                        log::trace!("Skipping optional group {} absent from {}", entry.group, model);
                        continue;
                    }
                }
            } else {
                accessor::extract(&properties, entry.group.names(), &model)?
            };

            let produced = entry.translation.apply(&group)?;
            log::trace!(
                "Group {} via '{}' produced {} parameters for {}",
                entry.group,
                entry.translation.name(),
                produced.len(),
                self.target
            );

            // Later entries overwrite earlier ones
            for (parameter, value) in produced {
                args.insert(parameter, value);
            }
        }

        match &self.parameters {
            Some(parameters) => parameters.bind(args),
            None => Ok(args),
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Target parameters, for targets with a fixed shape
    pub fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    pub fn target_name(&self) -> &str {
        &self.target
    }
}

impl<T> Clone for Mapper<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            plan: self.plan.clone(),
            parameters: self.parameters.clone(),
            _target: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Mapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("target", &self.target)
            .field("plan", &self.plan)
            .finish_non_exhaustive()
    }
}
