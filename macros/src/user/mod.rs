//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[derive(Composable)]` | on struct | Describe the struct as a composable type |

pub mod composable;

pub use composable::expand_derive_composable;
