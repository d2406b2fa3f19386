//! Error taxonomy for definition, composition, construction and member access.

use std::fmt;

use thiserror::Error;

use crate::catalog::TypeId;
use crate::value::ValueError;

/// Boxed failure raised by a user initializer or `on_derived` hook.
pub type ConstructionFailure = Box<dyn std::error::Error + Send + Sync>;

/// Registering a type in a [`Catalog`](crate::Catalog) failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefineError {
    #[error("a type named `{0}` is already defined")]
    DuplicateName(String),

    /// The builder refused a member definition, e.g. redefining a sealed slot.
    #[error("type `{ty}` has a rejected member definition: {source}")]
    Member {
        ty: String,
        #[source]
        source: MemberError,
    },
}

/// One chain that could not advance when a merge stalled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedChain {
    /// Name of the input type the chain was extracted from.
    pub source: String,
    /// Level names still unconsumed, head first.
    pub remaining: Vec<String>,
}

impl fmt::Display for BlockedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.source, self.remaining.join(" -> "))
    }
}

fn join_blocked(blocked: &[BlockedChain]) -> String {
    blocked
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Building a composite type failed. Always raised at `compose` time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// Following parents from `ty` revisited a level.
    #[error("cyclic ancestry in `{ty}`: {}", .cycle.join(" -> "))]
    CyclicAncestry { ty: String, cycle: Vec<String> },

    /// Input chains disagree on the relative order of shared levels.
    #[error("cannot linearize precedence, blocked chains: {}", join_blocked(.blocked))]
    ResolutionConflict { blocked: Vec<BlockedChain> },

    #[error("no type with id {0:?} in this catalog")]
    UnknownType(TypeId),

    #[error("type `{ty}` extends unknown type `{parent}`")]
    UnknownParent { ty: String, parent: String },

    /// Plain types inherit from plain types only.
    #[error("type `{ty}` extends composite type `{parent}`")]
    CompositeParent { ty: String, parent: String },

    #[error("compose requires at least one input type")]
    EmptyComposition,

    #[error(transparent)]
    Define(#[from] DefineError),
}

/// An input type's construction protocol failed; the composite instance
/// under construction is discarded.
#[derive(Debug, Error)]
#[error("constructing `{ty}` failed: {source}")]
pub struct ConstructionError {
    pub ty: String,
    #[source]
    pub source: ConstructionFailure,
}

impl ConstructionError {
    pub(crate) fn new(ty: impl Into<String>, source: impl Into<ConstructionFailure>) -> Self {
        Self { ty: ty.into(), source: source.into() }
    }
}

/// Reading, writing or invoking a member failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberError {
    #[error("no member named `{0}`")]
    Missing(String),

    #[error("member `{0}` is not callable")]
    NotCallable(String),

    #[error("member `{0}` is a method, call it instead")]
    IsMethod(String),

    #[error("member `{0}` is read-only")]
    ReadOnly(String),

    #[error("member `{0}` cannot be redefined")]
    NotConfigurable(String),

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Value(#[from] ValueError),
}
