//! `catalog validate` - check catalog invariants over a variants file.

#![allow(clippy::print_stdout)]

use std::path::Path;

use meltemi_core::Variant;

use super::{CommandError, read_json};

/// Validate a variants file, printing every violation.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the catalog
/// violates any invariant. All violations are printed before returning, so
/// an import run can be fixed in one pass.
pub fn validate(file: &Path) -> Result<(), CommandError> {
    let variants: Vec<Variant> = read_json(file)?;
    let issues = meltemi_core::catalog::validate(&variants);

    if issues.is_empty() {
        println!("OK: {} variant(s), no issues", variants.len());
        return Ok(());
    }

    for issue in &issues {
        println!("{issue}");
    }
    Err(CommandError::InvalidCatalog(issues.len()))
}
