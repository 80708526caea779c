//! Command handlers for CLI subcommands
//!
//! Handlers write their results to the writer they are given, so they can be
//! exercised without touching the process's stdout.

mod map;
mod validate;

pub use map::handle_map;
pub use validate::handle_validate;

use crate::config::read_document;
use crate::error::Result;
use remodel_core::declarative::PlanDocument;
use remodel_core::{Mapper, Record};
use std::path::Path;

/// Load a plan document and build its mapper
pub(crate) fn load_mapper(path: &Path) -> Result<Mapper<Record>> {
    let document: PlanDocument = read_document(path)?;
    tracing::debug!(
        mode = ?document.mode,
        entries = document.entries.len(),
        "Loaded plan document from {}",
        path.display()
    );
    Ok(document.into_mapper()?)
}
