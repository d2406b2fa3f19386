//! Procedural macros for the tola-compose composition engine
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[derive(Composable)]` | struct | Describe a struct as a composable type |
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Composable)]
//! struct HasAge {
//!     age: i64,
//! }
//!
//! let mut catalog = Catalog::new();
//! let has_age = catalog.define_composable::<HasAge>()?;
//! let instance = catalog.instantiate(has_age, &HasAge { age: 3 }.to_args())?;
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

// =============================================================================
// Module Declarations (Two-tier: common / user)
// =============================================================================

mod common;
mod user;

// =============================================================================
// User-Facing Macros (user/)
// =============================================================================

/// Derive `tola_compose::Composable`.
///
/// Container attributes: `#[compose(name = "...")]` overrides the type
/// name, `#[compose(extends = "...")]` names the parent type.
/// Field attribute: `#[compose(skip)]` keeps a field out of the instance.
#[proc_macro_derive(Composable, attributes(compose))]
pub fn derive_composable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    user::expand_derive_composable(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
