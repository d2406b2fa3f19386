//! # Instances
//!
//! An instance owns its own members and shares an immutable, already
//! flattened member table computed from its type's precedence chain.
//! Lookup is two steps, own slots then the table; nothing walks a chain
//! at call time.

use std::sync::Arc;

use crate::catalog::TypeId;
use crate::error::MemberError;
use crate::member::{Descriptor, Member, Members};
use crate::value::Value;

/// A constructed object, plain or composite.
#[derive(Debug, Clone)]
pub struct Instance {
    type_id: TypeId,
    type_name: Arc<str>,
    own: Members,
    table: Arc<Members>,
    signature: Option<Arc<str>>,
}

impl Instance {
    pub(crate) fn new(type_id: TypeId, type_name: Arc<str>, table: Arc<Members>) -> Self {
        Self { type_id, type_name, own: Members::new(), table, signature: None }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Diagnostic signature `mergedLevelNames:(inputTypeNames)`. Only
    /// composite instances carry one.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub(crate) fn set_signature(&mut self, signature: Arc<str>) {
        self.signature = Some(signature);
    }

    /// Own members only.
    pub fn own(&self) -> &Members {
        &self.own
    }

    pub(crate) fn own_mut(&mut self) -> &mut Members {
        &mut self.own
    }

    pub fn own_names(&self) -> Vec<&str> {
        self.own.names().collect()
    }

    /// Every reachable member name: own slots first, then table entries
    /// they do not shadow.
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.own.names().collect();
        names.extend(self.table.names().filter(|n| !self.own.contains(n)));
        names
    }

    pub fn lookup(&self, name: &str) -> Option<&Descriptor> {
        self.own.get(name).or_else(|| self.table.get(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Define an own slot. Fails on a non-configurable existing slot.
    pub fn define(&mut self, name: impl Into<String>, descriptor: impl Into<Descriptor>) -> Result<(), MemberError> {
        self.own.define(name, descriptor)
    }

    /// Read a member's value, running accessor getters.
    pub fn get(&self, name: &str) -> Result<Value, MemberError> {
        let descriptor = self.lookup(name).ok_or_else(|| MemberError::Missing(name.to_owned()))?;
        match &descriptor.member {
            Member::Value(v) => Ok(v.clone()),
            Member::Accessor(accessor) => match &accessor.get {
                Some(get) => get(self),
                None => Ok(Value::Null),
            },
            Member::Method(_) => Err(MemberError::IsMethod(name.to_owned())),
        }
    }

    /// Assign a member.
    ///
    /// Own writable slots are replaced in place and accessors run their
    /// setter. A name only present in the table is shadowed by a new own
    /// slot unless the table slot is read-only.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), MemberError> {
        let value = value.into();
        if let Some(descriptor) = self.own.get_mut(name) {
            if let Member::Accessor(accessor) = &descriptor.member {
                let set = accessor.set.clone().ok_or_else(|| MemberError::ReadOnly(name.to_owned()))?;
                return set(self, value);
            }
            if !descriptor.writable {
                return Err(MemberError::ReadOnly(name.to_owned()));
            }
            descriptor.member = Member::Value(value);
            return Ok(());
        }

        let setter = match self.table.get(name) {
            Some(Descriptor { member: Member::Accessor(accessor), .. }) => {
                Some(accessor.set.clone().ok_or_else(|| MemberError::ReadOnly(name.to_owned()))?)
            }
            Some(descriptor) if !descriptor.writable => {
                return Err(MemberError::ReadOnly(name.to_owned()));
            }
            _ => None,
        };
        match setter {
            Some(set) => set(self, value),
            None => self.own.define(name, value),
        }
    }

    /// Invoke a method member with `args`.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, MemberError> {
        let method = match self.lookup(name) {
            Some(Descriptor { member: Member::Method(method), .. }) => method.clone(),
            Some(_) => return Err(MemberError::NotCallable(name.to_owned())),
            None => return Err(MemberError::Missing(name.to_owned())),
        };
        method(self, args)
    }
}
