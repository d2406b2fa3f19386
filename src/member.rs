//! # Members
//!
//! A level, an instance and a type's statics all hold the same thing: an
//! insertion-ordered table of named [`Descriptor`]s.
//!
//! ```text
//! Members
//!   "greet"    -> Descriptor { Method(..),   writable, configurable }
//!   "age"      -> Descriptor { Value(Int),   writable, configurable }
//!   "[[type]]" -> Descriptor { Value(Str),   read-only, fixed }
//! ```
//!
//! [`Members::proxify`] is the one copying primitive of the crate. It copies
//! every own descriptor of a source table onto a target, forcing the copies
//! to be configurable so that a later copy can override them, and never
//! touching a slot the target has fixed.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::MemberError;
use crate::instance::Instance;
use crate::value::Value;

/// Shared method body: receives the instance it was invoked on.
pub type Method = Arc<dyn Fn(&mut Instance, &[Value]) -> Result<Value, MemberError> + Send + Sync>;

/// Shared accessor getter.
pub type Getter = Arc<dyn Fn(&Instance) -> Result<Value, MemberError> + Send + Sync>;

/// Shared accessor setter.
pub type Setter = Arc<dyn Fn(&mut Instance, Value) -> Result<(), MemberError> + Send + Sync>;

/// Computed member with optional read and write halves.
#[derive(Clone, Default)]
pub struct Accessor {
    pub get: Option<Getter>,
    pub set: Option<Setter>,
}

impl Accessor {
    pub fn getter<F>(get: F) -> Self
    where
        F: Fn(&Instance) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        Self { get: Some(Arc::new(get)), set: None }
    }

    pub fn with_setter<F>(mut self, set: F) -> Self
    where
        F: Fn(&mut Instance, Value) -> Result<(), MemberError> + Send + Sync + 'static,
    {
        self.set = Some(Arc::new(set));
        self
    }
}

/// What a member slot holds.
#[derive(Clone)]
pub enum Member {
    Value(Value),
    Method(Method),
    Accessor(Accessor),
}

impl Member {
    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        Member::Method(Arc::new(f))
    }

    /// Two members are the same definition: equal values, or the very same
    /// shared callable.
    pub fn same_as(&self, other: &Member) -> bool {
        match (self, other) {
            (Member::Value(a), Member::Value(b)) => a == b,
            (Member::Method(a), Member::Method(b)) => Arc::ptr_eq(a, b),
            (Member::Accessor(a), Member::Accessor(b)) => {
                same_opt(&a.get, &b.get) && same_opt(&a.set, &b.set)
            }
            _ => false,
        }
    }
}

fn same_opt<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Member::Method(_) => f.write_str("Method(..)"),
            Member::Accessor(a) => f
                .debug_struct("Accessor")
                .field("get", &a.get.is_some())
                .field("set", &a.set.is_some())
                .finish(),
        }
    }
}

/// A member plus its slot attributes.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub member: Member,
    /// Plain assignment may replace a `Value` slot.
    pub writable: bool,
    /// The slot may be redefined or overwritten by a copy.
    pub configurable: bool,
}

impl Descriptor {
    pub fn new(member: Member) -> Self {
        Self { member, writable: true, configurable: true }
    }

    /// Non-writable, non-configurable value slot.
    pub fn fixed(value: Value) -> Self {
        Self { member: Member::Value(value), writable: false, configurable: false }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.configurable = false;
        self
    }
}

impl From<Member> for Descriptor {
    fn from(member: Member) -> Self { Descriptor::new(member) }
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self { Descriptor::new(Member::Value(value)) }
}

/// Insertion-ordered own member table.
#[derive(Debug, Clone, Default)]
pub struct Members {
    slots: IndexMap<String, Descriptor>,
}

impl Members {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.slots.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Descriptor> {
        self.slots.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Define or redefine `name`. Refuses to touch a non-configurable slot.
    pub fn define(&mut self, name: impl Into<String>, descriptor: impl Into<Descriptor>) -> Result<(), MemberError> {
        let name = name.into();
        if let Some(existing) = self.slots.get(&name) {
            if !existing.configurable {
                return Err(MemberError::NotConfigurable(name));
            }
        }
        self.slots.insert(name, descriptor.into());
        Ok(())
    }

    /// Insert only when `name` is absent. Returns whether it was inserted.
    pub(crate) fn insert_if_absent(&mut self, name: &str, descriptor: &Descriptor) -> bool {
        if self.slots.contains_key(name) {
            return false;
        }
        self.slots.insert(name.to_owned(), descriptor.clone());
        true
    }

    /// Copy every descriptor of `source` onto `self` as a configurable slot.
    ///
    /// Names listed in `exclude` are skipped, and so is any name whose
    /// existing slot on `self` is not configurable. Returns the number of
    /// slots written.
    pub fn proxify(&mut self, source: &Members, exclude: &[&str]) -> usize {
        let mut written = 0;
        for (name, descriptor) in source.iter() {
            if exclude.contains(&name) {
                continue;
            }
            if let Some(existing) = self.slots.get(name) {
                if !existing.configurable {
                    continue;
                }
            }
            let mut copy = descriptor.clone();
            copy.configurable = true;
            self.slots.insert(name.to_owned(), copy);
            written += 1;
        }
        written
    }
}

impl<N: Into<String>, D: Into<Descriptor>> FromIterator<(N, D)> for Members {
    fn from_iter<I: IntoIterator<Item = (N, D)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(|(n, d)| (n.into(), d.into())).collect(),
        }
    }
}
