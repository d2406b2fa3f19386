use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Field, Fields};

use crate::common::{is_skipped, parse_container_args};

/// #[derive(Composable)] describes a struct as a type definition.
///
/// Every named field that is not `#[compose(skip)]` becomes an own member
/// of each instance, filled from the constructor argument at the field's
/// position among the kept fields:
///
/// ```ignore
/// #[derive(Composable)]
/// #[compose(name = "HasAge", extends = "Animal")]
/// struct Age { age: i64 }
///
/// // expands to roughly
/// impl ::tola_compose::Composable for Age {
///     fn type_def() -> ::tola_compose::TypeDef {
///         ::tola_compose::TypeDef::new("HasAge")
///             .extends("Animal")
///             .init(|this, args| {
///                 this.define("age", Value::from(positional::<i64>(args, 0usize)?))?;
///                 Ok(())
///             })
///     }
///     fn to_args(&self) -> Vec<Value> { vec![Value::from(self.age.clone())] }
/// }
/// ```
pub fn expand_derive_composable(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let container = parse_container_args(&input.attrs)?;

    let name = match container.name {
        Some(lit) => lit.value(),
        None => ident.to_string(),
    };
    let extends = container.extends.map(|parent| quote! { .extends(#parent) });

    let fields = kept_fields(&input)?;
    let idents: Vec<_> = fields.iter().filter_map(|f| f.ident.as_ref()).collect();
    let member_names: Vec<String> = idents
        .iter()
        .map(|i| i.to_string().trim_start_matches("r#").to_owned())
        .collect();
    let tys: Vec<_> = fields.iter().map(|f| &f.ty).collect();
    let positions = 0..fields.len();

    let init = (!fields.is_empty()).then(|| {
        quote! {
            .init(|this, args| {
                #(
                    this.define(
                        #member_names,
                        ::tola_compose::Value::from(::tola_compose::positional::<#tys>(args, #positions)?),
                    )?;
                )*
                ::core::result::Result::Ok(())
            })
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tola_compose::Composable for #ident #ty_generics #where_clause {
            fn type_def() -> ::tola_compose::TypeDef {
                ::tola_compose::TypeDef::new(#name)
                    #extends
                    #init
            }

            fn to_args(&self) -> ::std::vec::Vec<::tola_compose::Value> {
                ::std::vec![
                    #( ::tola_compose::Value::from(::core::clone::Clone::clone(&self.#idents)) ),*
                ]
            }
        }
    })
}

fn kept_fields(input: &DeriveInput) -> syn::Result<Vec<&Field>> {
    let fields = match &input.data {
        Data::Struct(DataStruct { fields: Fields::Named(named), .. }) => named.named.iter().collect::<Vec<_>>(),
        Data::Struct(DataStruct { fields: Fields::Unit, .. }) => Vec::new(),
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`#[derive(Composable)]` supports structs with named fields or unit structs\n\
                 \n\
                 Each named field becomes an own member of every instance.",
            ));
        }
    };

    let mut kept = Vec::with_capacity(fields.len());
    for field in fields {
        if !is_skipped(&field.attrs)? {
            kept.push(field);
        }
    }
    Ok(kept)
}
