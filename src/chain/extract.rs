//! Chain extraction: follow declared parents from a type down to the root.

use std::collections::HashSet;

use tracing::trace;

use super::Chain;
use crate::catalog::{Catalog, TypeEntry, TypeId};
use crate::error::ComposeError;

/// Extract `ty`'s ancestor chain, most-derived level first.
///
/// The root sentinel closes every plain chain but is only kept when it
/// declares members. A composite's chain is its origin levels in lookup
/// order. Fails on unknown or composite parents and on cycles.
pub fn extract_chain(catalog: &Catalog, ty: TypeId) -> Result<Chain, ComposeError> {
    if let TypeEntry::Composite(composite) = catalog.entry(ty)? {
        return Ok(Chain::new(ty, composite.precedence().to_vec()));
    }

    let mut levels = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = Some(ty);
    while let Some(level) = cursor {
        if !seen.insert(level) {
            let mut cycle: Vec<String> = levels.iter().map(|&l| catalog.name_of(l).to_owned()).collect();
            cycle.push(catalog.name_of(level).to_owned());
            return Err(ComposeError::CyclicAncestry {
                ty: catalog.name_of(ty).to_owned(),
                cycle,
            });
        }
        levels.push(level);
        cursor = catalog.parent(level)?;
    }

    if levels.last() == Some(&Catalog::ROOT) && !catalog.root_declares_members() {
        levels.pop();
    }

    trace!(ty = catalog.name_of(ty), depth = levels.len(), "extracted chain");
    Ok(Chain::new(ty, levels))
}
