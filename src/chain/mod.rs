//! # Precedence Chains
//!
//! The composition pipeline, leaves first:
//!
//! ```text
//! input types --extract--> Chain per type
//!             --merge----> merged sequence (each level once, every chain's order kept)
//!             --order----> precedence order (later inputs before earlier ones)
//!             --proxy----> LevelProxy per level (private configurable copies)
//!             --splice---> SplicedChain (head = most specific, tail = shared root)
//! ```
//!
//! The merged sequence names the composite in its signature. Lookup
//! follows the precedence order, so a level member declared by several
//! inputs resolves to the last input that declares it.
//!
//! A plain type owns exactly one level, so a level is identified by the
//! [`TypeId`] of the plain type that declares it.

pub mod extract;
pub mod merge;
pub mod splice;

pub use extract::extract_chain;
pub use merge::{merge_chains, precedence_order, MergeError};
pub use splice::{make_proxy, splice, LevelProxy, SplicedChain};

use crate::catalog::TypeId;

/// One type's levels in precedence order, most-derived first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    source: TypeId,
    levels: Vec<TypeId>,
}

impl Chain {
    pub(crate) fn new(source: TypeId, levels: Vec<TypeId>) -> Self {
        Self { source, levels }
    }

    /// The type this chain was extracted from.
    pub fn source(&self) -> TypeId {
        self.source
    }

    pub fn levels(&self) -> &[TypeId] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
