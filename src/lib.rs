// Feature flags handled:
// - std: default
// - derive: re-exports #[derive(Composable)]
// - serde: Value (de)serialization, ComposeOptions deserialization

//! # tola-compose
//!
//! Multiple-capability composition: build one composite type out of several
//! independently defined types, each a linear chain of capability levels.
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Data                                                    |
//! |  - Value, Member, Descriptor, Members (configurable copy)         |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Types                                                   |
//! |  - TypeDef, Catalog (arena, TypeId = level identity), Instance    |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: Chains                                                  |
//! |  - extract_chain, merge_chains, precedence_order, splice          |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 3: Composition                                             |
//! |  - Catalog::compose, CompositeType, ConstructArgs                 |
//! +-------------------------------------------------------------------+
//! ```
//!
//! Composite instances are flat: every member of every input sub-instance
//! is copied onto the composite at construction time, and level members
//! are resolved once, when the type is composed. Nothing is looked up
//! through a chain afterwards, and composing never modifies the inputs.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tola_compose::prelude::*;
//!
//! let mut catalog = Catalog::new();
//! let has_name = catalog.define(
//!     TypeDef::new("HasName").method("greet", |_, _| Ok(Value::from("hi"))),
//! )?;
//! let has_age = catalog.define(
//!     TypeDef::new("HasAge")
//!         .init(|this, args| {
//!             this.define("age", Value::from(positional::<i64>(args, 0)?))?;
//!             Ok(())
//!         })
//!         .method("birthday", |this, _| {
//!             let age = i64::try_from(this.get("age")?)?;
//!             this.set("age", age + 1)?;
//!             Ok(Value::Null)
//!         }),
//! )?;
//!
//! let person = catalog.compose(&[has_name, has_age])?;
//! let mut p = catalog.construct(person, &ConstructArgs::new().with(has_age, [41]))?;
//! p.call("birthday", &[])?;
//! assert_eq!(p.get("age")?, Value::Int(42));
//! assert_eq!(p.signature(), Some("HasName:HasAge:(HasName,HasAge)"));
//! ```

// Allow `::tola_compose` to work inside the crate itself
extern crate self as tola_compose;

// Re-export paste for the type_def! macro
#[doc(hidden)]
pub use paste;

// =============================================================================
// Layer 0: Data
// =============================================================================
pub mod value;
pub mod member;
pub mod error;

// =============================================================================
// Layer 1: Types
// =============================================================================
pub mod typedef;
pub mod catalog;
pub mod instance;

// =============================================================================
// Layer 2: Chains
// =============================================================================
pub mod chain;

// =============================================================================
// Layer 3: Composition
// =============================================================================
pub mod compose;

// Syntax macros (type_def!)
pub mod syntax_macros;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use catalog::{Catalog, TypeEntry, TypeId};
pub use chain::{Chain, LevelProxy, MergeError, SplicedChain};
pub use compose::{ComposeOptions, CompositeType, ConstructArgs, PROTOTYPE_SLOT};
pub use error::{BlockedChain, ComposeError, ConstructionError, ConstructionFailure, DefineError, MemberError};
pub use instance::Instance;
pub use member::{Accessor, Descriptor, Member, Members};
pub use typedef::{Composable, TypeDef};
pub use value::{positional, Value, ValueError};

#[cfg(feature = "derive")]
pub use macros::Composable;

/// Common items for defining and composing types.
pub mod prelude {
    pub use crate::{
        Accessor, Catalog, ComposeError, ComposeOptions, Composable, ConstructArgs,
        ConstructionError, Descriptor, Instance, Member, MemberError, TypeDef, TypeId, Value,
        positional,
    };
    pub use crate::type_def;
}
