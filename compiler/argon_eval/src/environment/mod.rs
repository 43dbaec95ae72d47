//! Scope chains and bindings.
//!
//! A chain is an ordered list of frames, outermost first. Frames are shared:
//! the frame a module's top level ran against is the same frame the module
//! registry holds, so later definitions and assignments made through either
//! handle are visible through the other.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use argon_ir::{AssignKind, FunctionDef};

use crate::native::NativeFunction;
use crate::registry::ModuleId;
use crate::Value;

/// A single-threaded shared frame handle.
///
/// All frame allocations go through [`LocalScope::new`]. The wrapper is
/// `Rc`-based and therefore not `Send`; evaluation is single-threaded.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether two handles point at the same frame.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The kind of a stored binding.
///
/// `Preset` is an assignment mode, not a binding kind; assignments of either
/// mode store `Plain` bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Plain,
    Func,
    NativeFunc,
}

impl BindingKind {
    /// Whether calls may target this binding directly.
    #[inline]
    pub fn is_callable(self) -> bool {
        matches!(self, BindingKind::Func | BindingKind::NativeFunc)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BindingKind::Plain => "var",
            BindingKind::Func => "func",
            BindingKind::NativeFunc => "native",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a binding holds.
#[derive(Clone, Debug)]
pub enum BindingSlot {
    Value(Value),
    Function(Rc<FunctionDef>),
    Native(NativeFunction),
}

/// A named entry in a frame.
#[derive(Clone, Debug)]
pub struct Binding {
    pub slot: BindingSlot,
    /// Module whose code created the binding. For functions this is the
    /// module whose top-level frame the body runs against.
    pub module: ModuleId,
}

impl Binding {
    pub fn plain(value: Value, module: ModuleId) -> Self {
        Binding {
            slot: BindingSlot::Value(value),
            module,
        }
    }

    pub fn function(def: Rc<FunctionDef>, module: ModuleId) -> Self {
        Binding {
            slot: BindingSlot::Function(def),
            module,
        }
    }

    pub fn native(func: NativeFunction) -> Self {
        Binding {
            slot: BindingSlot::Native(func),
            module: ModuleId::native(),
        }
    }

    #[inline]
    pub fn kind(&self) -> BindingKind {
        match self.slot {
            BindingSlot::Value(_) => BindingKind::Plain,
            BindingSlot::Function(_) => BindingKind::Func,
            BindingSlot::Native(_) => BindingKind::NativeFunc,
        }
    }

    /// The stored value of a `Plain` binding.
    pub fn value(&self) -> Option<&Value> {
        match &self.slot {
            BindingSlot::Value(v) => Some(v),
            BindingSlot::Function(_) | BindingSlot::Native(_) => None,
        }
    }
}

/// Name to binding map for one scope level.
pub type Frame = FxHashMap<String, Binding>;

/// Ordered frames, outermost first; the last frame is the writable one.
#[derive(Clone, Debug)]
pub struct ScopeChain {
    frames: Vec<LocalScope<Frame>>,
    /// Always `frames[0]`.
    root: LocalScope<Frame>,
}

impl ScopeChain {
    /// A chain holding only `root`.
    pub fn new(root: LocalScope<Frame>) -> Self {
        ScopeChain {
            frames: vec![root.clone()],
            root,
        }
    }

    /// A chain of `root` followed by `rest`, innermost last.
    pub fn with_frames(
        root: LocalScope<Frame>,
        rest: impl IntoIterator<Item = LocalScope<Frame>>,
    ) -> Self {
        let mut chain = ScopeChain::new(root);
        chain.frames.extend(rest);
        chain
    }

    /// Number of frames, including the root.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frames outermost first.
    pub fn frames(&self) -> &[LocalScope<Frame>] {
        &self.frames
    }

    /// The innermost (writable) frame.
    #[inline]
    pub fn innermost(&self) -> &LocalScope<Frame> {
        self.frames.last().unwrap_or(&self.root)
    }

    /// Push a fresh empty frame.
    #[inline]
    pub fn push(&mut self) {
        self.push_frame(LocalScope::new(Frame::default()));
    }

    /// Push an existing frame as the innermost one.
    #[inline]
    pub fn push_frame(&mut self, frame: LocalScope<Frame>) {
        self.frames.push(frame);
    }

    /// Pop the innermost frame. The root frame is never popped.
    #[inline]
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Nearest binding for `name`, innermost first.
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.borrow().get(name).cloned())
    }

    /// The nearest frame that binds `name`.
    pub fn find_frame(&self, name: &str) -> Option<&LocalScope<Frame>> {
        self.frames
            .iter()
            .rev()
            .find(|frame| frame.borrow().contains_key(name))
    }

    /// Bind `name` in the innermost frame, replacing any binding there.
    #[inline]
    pub fn declare(&self, name: impl Into<String>, binding: Binding) {
        self.innermost().borrow_mut().insert(name.into(), binding);
    }

    /// The frame an assignment of the given mode would write into, if the
    /// name already exists there.
    ///
    /// `Plain` looks at the innermost frame, then at the root for a
    /// function binding, so natives stay read-only from every depth.
    /// `Preset` searches the whole chain.
    pub fn assign_target(&self, name: &str, mode: AssignKind) -> Option<&LocalScope<Frame>> {
        match mode {
            AssignKind::Plain => {
                let inner = self.innermost();
                if inner.borrow().contains_key(name) {
                    return Some(inner);
                }
                let fixed = self
                    .root
                    .borrow()
                    .get(name)
                    .is_some_and(|binding| binding.kind().is_callable());
                fixed.then_some(&self.root)
            }
            AssignKind::Preset => self.find_frame(name),
        }
    }

    /// Check that an assignment of the given mode may proceed.
    ///
    /// Fails with the kind of the existing binding when it is not `Plain`.
    pub fn check_assignable(&self, name: &str, mode: AssignKind) -> Result<(), BindingKind> {
        let Some(frame) = self.assign_target(name, mode) else {
            return Ok(());
        };
        match frame.borrow().get(name).map(Binding::kind) {
            Some(BindingKind::Plain) | None => Ok(()),
            Some(kind) => Err(kind),
        }
    }

    /// Overwrite an existing `Plain` binding in the frame that owns it.
    ///
    /// Returns `Ok(false)` when the mode finds no binding to overwrite. The
    /// binding keeps its kind and defining module.
    pub fn assign_existing(
        &self,
        name: &str,
        value: Value,
        mode: AssignKind,
    ) -> Result<bool, BindingKind> {
        let Some(frame) = self.assign_target(name, mode) else {
            return Ok(false);
        };
        let mut frame = frame.borrow_mut();
        let Some(binding) = frame.get_mut(name) else {
            return Ok(false);
        };
        let kind = binding.kind();
        match &mut binding.slot {
            BindingSlot::Value(slot) => {
                *slot = value;
                Ok(true)
            }
            BindingSlot::Function(_) | BindingSlot::Native(_) => Err(kind),
        }
    }

    /// Assign `value` to `name`: overwrite the existing binding the mode
    /// selects, or declare a fresh `Plain` binding in the innermost frame.
    pub fn assign(
        &self,
        name: &str,
        value: Value,
        mode: AssignKind,
        module: &ModuleId,
    ) -> Result<(), BindingKind> {
        if self.assign_existing(name, value.clone(), mode)? {
            return Ok(());
        }
        self.declare(name, Binding::plain(value, module.clone()));
        Ok(())
    }

    /// Define or redefine a user function.
    ///
    /// A name bound anywhere in the chain must already be a function, which
    /// is replaced where it lives. Otherwise the function is declared in the
    /// innermost frame.
    pub fn define_function(
        &self,
        def: Rc<FunctionDef>,
        module: &ModuleId,
    ) -> Result<(), BindingKind> {
        let binding = Binding::function(Rc::clone(&def), module.clone());
        if let Some(frame) = self.find_frame(&def.name) {
            let mut frame = frame.borrow_mut();
            if let Some(existing) = frame.get_mut(&def.name) {
                if existing.kind() != BindingKind::Func {
                    return Err(existing.kind());
                }
                *existing = binding;
                return Ok(());
            }
        }
        self.declare(def.name.clone(), binding);
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
