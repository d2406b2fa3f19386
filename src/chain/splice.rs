//! Level proxies and splicing.
//!
//! A proxy owns configurable copies of one level's members and remembers
//! the level it came from. Splicing links proxies into a single precedence
//! chain without touching the original levels.

use crate::catalog::TypeId;
use crate::member::Members;

/// Private, relinkable copy of one level.
#[derive(Debug, Clone)]
pub struct LevelProxy {
    origin: TypeId,
    members: Members,
    next: Option<usize>,
}

impl LevelProxy {
    /// The level this proxy copies. Identity only, never ownership.
    pub fn origin(&self) -> TypeId {
        self.origin
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    /// Index of the next less specific proxy in the owning [`SplicedChain`].
    pub fn next(&self) -> Option<usize> {
        self.next
    }
}

/// Copy `members` of `level` into a fresh, unlinked proxy.
pub fn make_proxy(level: TypeId, members: &Members) -> LevelProxy {
    let mut copy = Members::new();
    copy.proxify(members, &[]);
    LevelProxy { origin: level, members: copy, next: None }
}

/// Proxies linked head to tail. Owns every proxy it links.
#[derive(Debug, Clone, Default)]
pub struct SplicedChain {
    proxies: Vec<LevelProxy>,
}

/// Link `proxies`, given most specific first, so each one's `next` is the
/// proxy that follows it. The first proxy is the head and the last is the
/// shared root.
pub fn splice(mut proxies: Vec<LevelProxy>) -> SplicedChain {
    let len = proxies.len();
    for (index, proxy) in proxies.iter_mut().enumerate() {
        proxy.next = (index + 1 < len).then_some(index + 1);
    }
    SplicedChain { proxies }
}

impl SplicedChain {
    pub fn head(&self) -> Option<&LevelProxy> {
        self.proxies.first()
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Walk the precedence links from the head.
    pub fn walk(&self) -> impl Iterator<Item = &LevelProxy> {
        std::iter::successors(self.head(), |proxy| proxy.next.and_then(|i| self.proxies.get(i)))
    }

    pub fn origins(&self) -> Vec<TypeId> {
        self.walk().map(LevelProxy::origin).collect()
    }

    /// Resolve every name along the chain once: the first proxy that
    /// declares a name wins.
    pub fn flatten(&self) -> Members {
        flatten_levels(self.walk().map(LevelProxy::members))
    }
}

/// Resolve names over `levels` given in precedence order.
pub(crate) fn flatten_levels<'a>(levels: impl IntoIterator<Item = &'a Members>) -> Members {
    let mut table = Members::new();
    for level in levels {
        for (name, descriptor) in level.iter() {
            table.insert_if_absent(name, descriptor);
        }
    }
    table
}
