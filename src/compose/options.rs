//! Knobs for a single `compose` call.

/// Static slot holding the per-instance construction template. Never
/// copied onto a composite.
pub const PROTOTYPE_SLOT: &str = "prototype";

/// Options for [`Catalog::compose_with`](crate::Catalog::compose_with).
///
/// With the `serde` feature the struct deserializes from any format with
/// missing fields taking their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ComposeOptions {
    /// Register the composite under this name. Unnamed composites are
    /// reachable by id only.
    pub name: Option<String>,
    /// Run the inputs' `on_derived` hooks during construction.
    pub run_hooks: bool,
    /// Static member names left out of the composite's statics.
    pub exclude_statics: Vec<String>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            name: None,
            run_hooks: true,
            exclude_statics: vec![PROTOTYPE_SLOT.to_owned()],
        }
    }
}

impl ComposeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn without_hooks(mut self) -> Self {
        self.run_hooks = false;
        self
    }

    pub fn exclude_static(mut self, name: impl Into<String>) -> Self {
        self.exclude_statics.push(name.into());
        self
    }
}
