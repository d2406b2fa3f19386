//! Common parsing utilities
//!
//! Parsing for the `#[compose(...)]` helper attribute.

use syn::{Attribute, LitStr, Token};

// =============================================================================
// Container Attributes: `#[compose(name = "...", extends = "...")]`
// =============================================================================

/// Options collected from every `#[compose(...)]` on the container.
#[derive(Default)]
pub struct ContainerArgs {
    pub name: Option<LitStr>,
    pub extends: Option<LitStr>,
}

pub fn parse_container_args(attrs: &[Attribute]) -> syn::Result<ContainerArgs> {
    let mut args = ContainerArgs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("compose")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                args.name = Some(parse_value(&meta)?);
                Ok(())
            } else if meta.path.is_ident("extends") {
                args.extends = Some(parse_value(&meta)?);
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"` or `extends = \"...\"`"))
            }
        })?;
    }
    Ok(args)
}

fn parse_value(meta: &syn::meta::ParseNestedMeta) -> syn::Result<LitStr> {
    meta.input.parse::<Token![=]>()?;
    meta.input.parse()
}

// =============================================================================
// Field Attributes: `#[compose(skip)]`
// =============================================================================

pub fn is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("compose")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}
