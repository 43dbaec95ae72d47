//! Loaded modules.
//!
//! Each module is evaluated once. Its top-level frame is kept here under the
//! module's identity, and every function it defines runs against that frame
//! no matter where the call comes from.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::environment::{Frame, LocalScope};

/// Canonical identity of a module (normally its canonical path).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(Rc<str>);

impl ModuleId {
    /// Identity of the frame holding native functions.
    pub const NATIVE: &'static str = "<native>";

    pub fn new(id: impl AsRef<str>) -> Self {
        ModuleId(Rc::from(id.as_ref()))
    }

    pub fn native() -> Self {
        ModuleId::new(Self::NATIVE)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory relative imports from this module resolve against.
    ///
    /// An identity with no directory component resolves against `.`.
    pub fn base_dir(&self) -> &Path {
        match Path::new(self.as_str()).parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({:?})", self.as_str())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        ModuleId::new(id)
    }
}

impl From<String> for ModuleId {
    fn from(id: String) -> Self {
        ModuleId(Rc::from(id))
    }
}

/// Module identity to top-level frame.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: FxHashMap<ModuleId, LocalScope<Frame>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        ModuleRegistry::default()
    }

    /// Top-level frame of a loaded module.
    pub fn get(&self, id: &ModuleId) -> Option<LocalScope<Frame>> {
        self.modules.get(id).cloned()
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    /// Register `frame` as the top level of `id`.
    ///
    /// Idempotent: if `id` is already registered the existing frame is kept
    /// and returned.
    pub fn register(&mut self, id: ModuleId, frame: LocalScope<Frame>) -> LocalScope<Frame> {
        let frame = self.modules.entry(id.clone()).or_insert(frame).clone();
        tracing::debug!(module = %id, "registered module");
        frame
    }

    /// Forget a module, returning its frame.
    pub fn remove(&mut self, id: &ModuleId) -> Option<LocalScope<Frame>> {
        self.modules.remove(id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Identities of every loaded module, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys()
    }
}
