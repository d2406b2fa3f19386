//! # Type definitions
//!
//! A [`TypeDef`] declares one capability level: the members every instance
//! sees through its precedence chain, the static members carried by the
//! type itself, an initializer writing own members at construction, and an
//! optional hook run when an instance is folded into a composite.
//!
//! ```ignore
//! let has_age = TypeDef::new("HasAge")
//!     .init(|this, args| {
//!         this.define("age", Value::from(positional::<i64>(args, 0)?))?;
//!         Ok(())
//!     })
//!     .method("birthday", |this, _| {
//!         let age = i64::try_from(this.get("age")?)?;
//!         this.set("age", age + 1)?;
//!         Ok(Value::Null)
//!     });
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{ConstructionFailure, MemberError};
use crate::instance::Instance;
use crate::member::{Accessor, Descriptor, Member, Members};
use crate::value::Value;

/// Writes a fresh instance's own members from the constructor arguments.
pub type Initializer = Arc<dyn Fn(&mut Instance, &[Value]) -> Result<(), ConstructionFailure> + Send + Sync>;

/// Runs with a freshly built sub-instance and the composite it is being
/// folded into.
pub type DerivedHook = Arc<dyn Fn(&Instance, &mut Instance) -> Result<(), ConstructionFailure> + Send + Sync>;

/// Declaration of one plain type and its level.
#[derive(Clone)]
pub struct TypeDef {
    name: String,
    extends: Option<String>,
    members: Members,
    statics: Members,
    init: Option<Initializer>,
    on_derived: Option<DerivedHook>,
    rejected: Option<MemberError>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            members: Members::new(),
            statics: Members::new(),
            init: None,
            on_derived: None,
            rejected: None,
        }
    }

    /// Name the parent type. Resolved against the catalog when a chain is
    /// extracted, so the parent may be defined later.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, MemberError> + Send + Sync + 'static,
    {
        self.member(name, Member::method(f))
    }

    pub fn accessor(self, name: impl Into<String>, accessor: Accessor) -> Self {
        self.member(name, Member::Accessor(accessor))
    }

    /// Shared value visible on every instance until shadowed.
    pub fn value(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.member(name, Member::Value(value.into()))
    }

    /// Redefining a sealed slot is recorded and fails the later
    /// [`Catalog::define`](crate::Catalog::define).
    pub fn member(mut self, name: impl Into<String>, descriptor: impl Into<Descriptor>) -> Self {
        let result = self.members.define(name, descriptor);
        self.record(result);
        self
    }

    pub fn static_value(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.static_member(name, value.into())
    }

    pub fn static_member(mut self, name: impl Into<String>, descriptor: impl Into<Descriptor>) -> Self {
        let result = self.statics.define(name, descriptor);
        self.record(result);
        self
    }

    fn record(&mut self, result: Result<(), MemberError>) {
        if let Err(err) = result {
            self.rejected.get_or_insert(err);
        }
    }

    pub fn init<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<(), ConstructionFailure> + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(f));
        self
    }

    pub fn on_derived<F>(mut self, f: F) -> Self
    where
        F: Fn(&Instance, &mut Instance) -> Result<(), ConstructionFailure> + Send + Sync + 'static,
    {
        self.on_derived = Some(Arc::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    /// Own level members.
    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn statics(&self) -> &Members {
        &self.statics
    }

    pub fn initializer(&self) -> Option<&Initializer> {
        self.init.as_ref()
    }

    pub fn derived_hook(&self) -> Option<&DerivedHook> {
        self.on_derived.as_ref()
    }

    /// First member definition this builder refused.
    pub fn rejected(&self) -> Option<&MemberError> {
        self.rejected.as_ref()
    }

    /// Whether this level contributes anything to an instance.
    pub fn declares_members(&self) -> bool {
        !self.members.is_empty() || self.init.is_some()
    }

    pub(crate) fn detach_parent(mut self) -> Self {
        self.extends = None;
        self
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef")
            .field("name", &self.name)
            .field("extends", &self.extends)
            .field("members", &self.members.names().collect::<Vec<_>>())
            .field("statics", &self.statics.names().collect::<Vec<_>>())
            .field("init", &self.init.is_some())
            .field("on_derived", &self.on_derived.is_some())
            .field("rejected", &self.rejected)
            .finish()
    }
}

/// Rust types that describe themselves as a [`TypeDef`].
///
/// Usually derived with `#[derive(Composable)]`.
pub trait Composable {
    fn type_def() -> TypeDef;

    /// Positional constructor arguments reproducing `self`.
    fn to_args(&self) -> Vec<Value>;
}
