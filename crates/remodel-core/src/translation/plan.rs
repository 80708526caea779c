//! Translation plans
//!
//! A plan is an ordered list of (group key, translation) entries. Order matters:
//! when two entries produce the same parameter, the later one wins. Plans are
//! validated once, when a mapper is built.
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use super::types::{GroupKey, Translation};
use crate::introspect::{is_identifier, Parameters};
use crate::{Error, Result};
use std::collections::HashSet;

/// One step of a plan
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub group: GroupKey,
    pub translation: Translation,
    /// Skip the entry instead of failing when a group property is absent
    pub optional: bool,
}

impl PlanEntry {
    pub fn new(group: impl Into<GroupKey>, translation: Translation) -> Self {
        Self {
            group: group.into(),
            translation,
            optional: false,
        }
    }

    /// Make the entry optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Ordered translation plan
#[derive(Debug, Clone, Default)]
pub struct Plan {
    entries: Vec<PlanEntry>,
}

impl Plan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn add_entry(mut self, entry: PlanEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append a required entry for `group`
    pub fn add(self, group: impl Into<GroupKey>, translation: Translation) -> Self {
        self.add_entry(PlanEntry::new(group, translation))
    }

    /// Append an optional entry for `group`
    pub fn add_optional(self, group: impl Into<GroupKey>, translation: Translation) -> Self {
        self.add_entry(PlanEntry::new(group, translation).optional())
    }

    pub fn push(&mut self, entry: PlanEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the plan's structure against the target it builds.
    ///
    /// `parameters` is `None` for targets without a fixed shape, in which case
    /// declared outputs only need to be identifiers.
    pub fn validate(&self, target: &str, parameters: Option<&Parameters>) -> Result<()> {
        if self.entries.is_empty() {
            if parameters.map_or(false, Parameters::has_required) {
                return Err(Error::invalid_plan(
                    target,
                    format!("plan is empty but {} has required parameters", target),
                ));
            }
            return Ok(());
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            self.validate_entry(entry, target, parameters)?;

            if !seen.insert(&entry.group) {
                return Err(Error::invalid_plan(
                    target,
                    format!("group {} appears more than once", entry.group),
                ));
            }
        }

        Ok(())
    }

    fn validate_entry(&self, entry: &PlanEntry, target: &str, parameters: Option<&Parameters>) -> Result<()> {
        let group = &entry.group;
        let translation = &entry.translation;

        if group.is_empty() {
            return Err(Error::invalid_plan(target, "group key names no properties"));
        }
        if let Some(name) = group.names().iter().find(|name| !is_identifier(name)) {
            return Err(Error::invalid_plan(
                target,
                format!("group {} contains '{}', which is not an identifier", group, name),
            ));
        }

        if let Some(arity) = translation.arity() {
            if group.len() != arity {
                return Err(Error::invalid_plan(
                    target,
                    format!(
                        "translation '{}' takes {} propert{} but group {} has {}",
                        translation.name(),
                        arity,
                        if arity == 1 { "y" } else { "ies" },
                        group,
                        group.len()
                    ),
                ));
            }
        }

        if let Some(prefix) = translation.required_prefix() {
            if let Some(name) = group.names().iter().find(|name| !name.starts_with(prefix)) {
                return Err(Error::invalid_plan(
                    target,
                    format!(
                        "translation '{}' expects properties prefixed with '{}' but group {} contains '{}'",
                        translation.name(),
                        prefix,
                        group,
                        name
                    ),
                ));
            }
        }

        for output in translation.outputs().resolve(group).unwrap_or_default() {
            if !is_identifier(&output) {
                return Err(Error::invalid_plan(
                    target,
                    format!("group {} produces '{}', which is not an identifier", group, output),
                ));
            }
            if let Some(parameters) = parameters {
                if !parameters.contains(&output) {
                    return Err(Error::invalid_plan(
                        target,
                        format!("group {} produces '{}', which is not a parameter of {}", group, output, target),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl FromIterator<PlanEntry> for Plan {
    fn from_iter<I: IntoIterator<Item = PlanEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a PlanEntry;
    type IntoIter = std::slice::Iter<'a, PlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
