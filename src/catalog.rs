//! # Catalog
//!
//! A locally scoped arena of type definitions. Arena indices ([`TypeId`])
//! stand in for object identity: two chains share a level exactly when
//! they hold the same id.
//!
//! Slot 0 is the root sentinel every plain type without a declared parent
//! derives from. Chains only include it when it declares members.
//!
//! A catalog only grows. Defining or composing adds entries and never
//! rewrites existing ones, so a type behaves identically in every
//! composite it takes part in.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::chain::{self, splice::flatten_levels, Chain};
use crate::compose::{self, ComposeOptions, CompositeType, ConstructArgs};
use crate::error::{ComposeError, ConstructionError, DefineError};
use crate::instance::Instance;
use crate::member::Members;
use crate::typedef::{Composable, TypeDef};
use crate::value::Value;

/// Identity of a type (and of the level a plain type declares).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a catalog slot holds.
#[derive(Debug)]
pub enum TypeEntry {
    Plain(TypeDef),
    Composite(CompositeType),
}

impl TypeEntry {
    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Plain(def) => def.name(),
            TypeEntry::Composite(composite) => composite.name(),
        }
    }

    pub fn statics(&self) -> &Members {
        match self {
            TypeEntry::Plain(def) => def.statics(),
            TypeEntry::Composite(composite) => composite.statics(),
        }
    }
}

#[derive(Debug)]
pub struct Catalog {
    entries: Vec<TypeEntry>,
    names: HashMap<String, TypeId>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// The root sentinel's id.
    pub const ROOT: TypeId = TypeId(0);

    /// Catalog whose root sentinel is an empty `Root` type.
    pub fn new() -> Self {
        let root = TypeDef::new("Root");
        let names = HashMap::from([(root.name().to_owned(), Self::ROOT)]);
        Self { entries: vec![TypeEntry::Plain(root)], names }
    }

    /// Catalog with a caller-supplied root. Its parent, if any, is ignored.
    pub fn with_root(root: TypeDef) -> Result<Self, DefineError> {
        check_members(&root)?;
        let root = root.detach_parent();
        let names = HashMap::from([(root.name().to_owned(), Self::ROOT)]);
        Ok(Self { entries: vec![TypeEntry::Plain(root)], names })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a plain type.
    pub fn define(&mut self, def: TypeDef) -> Result<TypeId, DefineError> {
        check_members(&def)?;
        let name = def.name().to_owned();
        let id = self.reserve_name(&name)?;
        debug!(ty = %name, parent = ?def.parent_name(), id = id.0, "defined type");
        self.entries.push(TypeEntry::Plain(def));
        Ok(id)
    }

    /// Register a [`Composable`] Rust type.
    pub fn define_composable<T: Composable>(&mut self) -> Result<TypeId, DefineError> {
        self.define(T::type_def())
    }

    fn reserve_name(&mut self, name: &str) -> Result<TypeId, DefineError> {
        if self.names.contains_key(name) {
            return Err(DefineError::DuplicateName(name.to_owned()));
        }
        let id = TypeId(self.entries.len());
        self.names.insert(name.to_owned(), id);
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    pub fn entry(&self, id: TypeId) -> Result<&TypeEntry, ComposeError> {
        self.entries.get(id.0).ok_or(ComposeError::UnknownType(id))
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeEntry> {
        self.entries.get(id.0)
    }

    /// Name of `id`, or `"?"` for an id from another catalog.
    pub fn name_of(&self, id: TypeId) -> &str {
        self.entries.get(id.0).map_or("?", TypeEntry::name)
    }

    pub fn is_composite(&self, id: TypeId) -> bool {
        matches!(self.entries.get(id.0), Some(TypeEntry::Composite(_)))
    }

    /// Static members carried by the type value itself.
    pub fn statics(&self, id: TypeId) -> Option<&Members> {
        self.get(id).map(TypeEntry::statics)
    }

    pub(crate) fn plain(&self, id: TypeId) -> Option<&TypeDef> {
        match self.entries.get(id.0) {
            Some(TypeEntry::Plain(def)) => Some(def),
            _ => None,
        }
    }

    /// Own members of the level `id` declares. Composites declare none.
    pub fn level_members(&self, id: TypeId) -> Option<&Members> {
        self.plain(id).map(TypeDef::members)
    }

    pub(crate) fn root_declares_members(&self) -> bool {
        self.plain(Self::ROOT).is_some_and(TypeDef::declares_members)
    }

    /// Resolve the declared parent of plain type `id`.
    pub fn parent(&self, id: TypeId) -> Result<Option<TypeId>, ComposeError> {
        let TypeEntry::Plain(def) = self.entry(id)? else {
            return Ok(None);
        };
        let Some(parent_name) = def.parent_name() else {
            return Ok((id != Self::ROOT).then_some(Self::ROOT));
        };
        let parent = self.lookup(parent_name).ok_or_else(|| ComposeError::UnknownParent {
            ty: def.name().to_owned(),
            parent: parent_name.to_owned(),
        })?;
        if self.is_composite(parent) {
            return Err(ComposeError::CompositeParent {
                ty: def.name().to_owned(),
                parent: parent_name.to_owned(),
            });
        }
        Ok(Some(parent))
    }

    /// Ancestor chain of `id`, most-derived level first.
    pub fn chain(&self, id: TypeId) -> Result<Chain, ComposeError> {
        chain::extract_chain(self, id)
    }

    /// Build and register a composite of `inputs` with default options.
    pub fn compose(&mut self, inputs: &[TypeId]) -> Result<TypeId, ComposeError> {
        self.compose_with(inputs, &ComposeOptions::default())
    }

    pub fn compose_with(&mut self, inputs: &[TypeId], options: &ComposeOptions) -> Result<TypeId, ComposeError> {
        if let Some(name) = &options.name {
            if self.names.contains_key(name) {
                return Err(DefineError::DuplicateName(name.clone()).into());
            }
        }
        let composite = compose::build(self, inputs, options)?;
        let id = match &options.name {
            Some(name) => self.reserve_name(name)?,
            None => TypeId(self.entries.len()),
        };
        self.entries.push(TypeEntry::Composite(composite));
        Ok(id)
    }

    /// Construct an instance of plain type `id` with `args`.
    ///
    /// Initializers run root first, each seeing the same arguments. A
    /// composite `id` is constructed with no per-type arguments.
    pub fn instantiate(&self, id: TypeId, args: &[Value]) -> Result<Instance, ConstructionError> {
        match self.entry(id) {
            Ok(TypeEntry::Plain(_)) => self.instantiate_plain(id, args),
            Ok(TypeEntry::Composite(_)) => self.construct(id, &ConstructArgs::new()),
            Err(err) => Err(ConstructionError::new(self.name_of(id), err)),
        }
    }

    /// Construct an instance of any type, taking arguments per input type.
    pub fn construct(&self, id: TypeId, args: &ConstructArgs) -> Result<Instance, ConstructionError> {
        match self.entry(id) {
            Ok(TypeEntry::Plain(_)) => self.instantiate_plain(id, args.get(id)),
            Ok(TypeEntry::Composite(composite)) => compose::construct(self, id, composite, args),
            Err(err) => Err(ConstructionError::new(self.name_of(id), err)),
        }
    }

    fn instantiate_plain(&self, id: TypeId, args: &[Value]) -> Result<Instance, ConstructionError> {
        let name = self.name_of(id);
        let chain = self.chain(id).map_err(|err| ConstructionError::new(name, err))?;
        let defs: Vec<&TypeDef> = chain.levels().iter().filter_map(|&level| self.plain(level)).collect();

        let table = flatten_levels(defs.iter().map(|def| def.members()));
        let mut instance = Instance::new(id, Arc::from(name), Arc::new(table));
        for def in defs.iter().rev() {
            if let Some(init) = def.initializer() {
                init(&mut instance, args).map_err(|err| ConstructionError::new(def.name(), err))?;
            }
        }
        Ok(instance)
    }
}

fn check_members(def: &TypeDef) -> Result<(), DefineError> {
    match def.rejected() {
        Some(err) => Err(DefineError::Member { ty: def.name().to_owned(), source: err.clone() }),
        None => Ok(()),
    }
}
