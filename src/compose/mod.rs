//! # Composite Types
//!
//! `compose(type_1, ..., type_n)` merges the inputs' chains, proxies and
//! splices the merged levels, and records everything construction needs:
//!
//! ```text
//! Catalog::compose([HasName, HasAge])
//!   chains   [HasName] [HasAge]
//!   merged   [HasName, HasAge]              (signature)
//!   order    [HasAge, HasName]              (later inputs first)
//!   spliced  HasAge' -> HasName'            (private proxies)
//!   table    flatten(spliced)               (first declaration wins)
//!   statics  HasName.statics <- HasAge.statics  (last writer wins)
//! ```
//!
//! Constructing a composite builds one sub-instance per input in input
//! order, runs the inputs' `on_derived` hooks against the composite under
//! construction, copies each sub-instance's own members onto it (later
//! inputs overwrite earlier ones) and stamps the diagnostic signature.
//! Any failure discards the whole composite.
//!
//! Only plain inputs run hooks against the composite being built. A
//! composite input's own inputs ran theirs against that inner composite,
//! whose members are then copied like any other part.

pub mod options;

pub use options::{ComposeOptions, PROTOTYPE_SLOT};

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::catalog::{Catalog, TypeId};
use crate::chain::{
    extract_chain, make_proxy, merge_chains, precedence_order, splice, Chain, MergeError, SplicedChain,
};
use crate::error::{BlockedChain, ComposeError, ConstructionError};
use crate::instance::Instance;
use crate::member::{Descriptor, Members};
use crate::typedef::TypeDef;
use crate::value::Value;

/// A type built by flattening several input types.
#[derive(Debug, Clone)]
pub struct CompositeType {
    name: String,
    inputs: Vec<TypeId>,
    merged: Vec<TypeId>,
    precedence: Vec<TypeId>,
    spliced: SplicedChain,
    table: Arc<Members>,
    statics: Members,
    signature: Arc<str>,
    run_hooks: bool,
}

impl CompositeType {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input types in caller order.
    pub fn inputs(&self) -> &[TypeId] {
        &self.inputs
    }

    /// Merged sequence of origin levels, most specific first, ties in
    /// input order.
    pub fn merged(&self) -> &[TypeId] {
        &self.merged
    }

    /// Origin levels in lookup order: the spliced chain's head to tail.
    pub fn precedence(&self) -> &[TypeId] {
        &self.precedence
    }

    pub fn spliced(&self) -> &SplicedChain {
        &self.spliced
    }

    /// Level members resolved over the spliced chain.
    pub fn table(&self) -> &Members {
        &self.table
    }

    pub fn statics(&self) -> &Members {
        &self.statics
    }

    pub fn static_member(&self, name: &str) -> Option<&Descriptor> {
        self.statics.get(name)
    }

    /// `mergedLevelNames:(inputTypeNames)`
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Constructor arguments scoped by input type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructArgs {
    by_type: HashMap<TypeId, Vec<Value>>,
}

impl ConstructArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<I, V>(mut self, ty: TypeId, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.insert(ty, args.into_iter().map(Into::into).collect());
        self
    }

    pub fn insert(&mut self, ty: TypeId, args: Vec<Value>) {
        self.by_type.insert(ty, args);
    }

    /// Arguments for `ty`; empty when none were given.
    pub fn get(&self, ty: TypeId) -> &[Value] {
        self.by_type.get(&ty).map(Vec::as_slice).unwrap_or_default()
    }
}

pub(crate) fn build(catalog: &Catalog, inputs: &[TypeId], options: &ComposeOptions) -> Result<CompositeType, ComposeError> {
    if inputs.is_empty() {
        return Err(ComposeError::EmptyComposition);
    }

    let chains = inputs
        .iter()
        .map(|&ty| extract_chain(catalog, ty))
        .collect::<Result<Vec<_>, _>>()?;
    let levels: Vec<&[TypeId]> = chains.iter().map(Chain::levels).collect();
    let merged = merge_chains(&levels).map_err(|err| conflict(catalog, &chains, err))?;
    let precedence = precedence_order(&levels).map_err(|err| conflict(catalog, &chains, err))?;

    let empty = Members::new();
    let proxies = precedence
        .iter()
        .map(|&level| make_proxy(level, catalog.level_members(level).unwrap_or(&empty)))
        .collect();
    let spliced = splice(proxies);
    let table = Arc::new(spliced.flatten());

    let exclude: Vec<&str> = options.exclude_statics.iter().map(String::as_str).collect();
    let mut statics = Members::new();
    for &input in inputs {
        if let Some(input_statics) = catalog.statics(input) {
            statics.proxify(input_statics, &exclude);
        }
    }

    let names = |ids: &[TypeId], sep: &str| {
        ids.iter().map(|&id| catalog.name_of(id)).collect::<Vec<_>>().join(sep)
    };
    let signature: Arc<str> = format!("{}:({})", names(&merged[..], ":"), names(inputs, ",")).into();
    let name = options.name.clone().unwrap_or_else(|| names(inputs, "+"));

    debug!(ty = %name, %signature, levels = merged.len(), members = table.len(), "composed type");
    Ok(CompositeType {
        name,
        inputs: inputs.to_vec(),
        merged,
        precedence,
        spliced,
        table,
        statics,
        signature,
        run_hooks: options.run_hooks,
    })
}

fn conflict(catalog: &Catalog, chains: &[Chain], err: MergeError<TypeId>) -> ComposeError {
    let blocked = err
        .blocked
        .into_iter()
        .map(|(index, remaining)| BlockedChain {
            source: catalog.name_of(chains[index].source()).to_owned(),
            remaining: remaining.iter().map(|&id| catalog.name_of(id).to_owned()).collect(),
        })
        .collect();
    ComposeError::ResolutionConflict { blocked }
}

pub(crate) fn construct(
    catalog: &Catalog,
    id: TypeId,
    composite: &CompositeType,
    args: &ConstructArgs,
) -> Result<Instance, ConstructionError> {
    let mut parts = Vec::with_capacity(composite.inputs.len());
    for &input in &composite.inputs {
        parts.push((input, catalog.construct(input, args)?));
    }

    let mut this = Instance::new(id, Arc::from(composite.name.as_str()), Arc::clone(&composite.table));
    if composite.run_hooks {
        for (input, part) in &parts {
            if let Some(hook) = catalog.plain(*input).and_then(TypeDef::derived_hook) {
                hook(part, &mut this).map_err(|err| ConstructionError::new(catalog.name_of(*input), err))?;
            }
        }
    }

    for (_, part) in &parts {
        this.own_mut().proxify(part.own(), &[]);
    }
    this.set_signature(Arc::clone(&composite.signature));

    trace!(ty = %composite.name, own = this.own().len(), "constructed composite");
    Ok(this)
}
