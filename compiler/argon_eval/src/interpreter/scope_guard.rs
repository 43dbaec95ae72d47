//! RAII guards for chain management.
//!
//! Two guards cover every scope change the evaluator makes:
//! - [`ScopedInterpreter`] pushes a frame onto the active chain and pops it
//!   on drop (block bodies, loop passes, try/catch arms).
//! - [`Activation`] replaces the active chain and module wholesale and puts
//!   the old ones back on drop (function calls, module loads).
//!
//! Both deref to the interpreter, so code inside a scope uses it as usual.
//! Restoration runs during unwinding too.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::{Frame, LocalScope, ScopeChain};
use crate::registry::ModuleId;

/// Pops the frame it pushed when dropped.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

/// Restores the previous chain and module when dropped.
pub struct Activation<'guard> {
    interpreter: &'guard mut Interpreter,
    saved_env: ScopeChain,
    saved_module: ModuleId,
    /// Whether this activation counts toward the call-depth limit.
    is_call: bool,
}

impl Drop for Activation<'_> {
    fn drop(&mut self) {
        std::mem::swap(&mut self.interpreter.env, &mut self.saved_env);
        std::mem::swap(&mut self.interpreter.module, &mut self.saved_module);
        if self.is_call {
            self.interpreter.call_depth -= 1;
        }
    }
}

impl Deref for Activation<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for Activation<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a fresh frame, popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` with a fresh innermost frame.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` with `frame` pushed as the innermost frame.
    ///
    /// The frame outlives the guard, so a caller can push it again later
    /// and find the bindings it left there.
    pub fn with_frame_scope<T, F>(&mut self, frame: &LocalScope<Frame>, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        self.env.push_frame(frame.clone());
        let mut scoped = ScopedInterpreter { interpreter: self };
        f(&mut scoped)
    }

    /// Switch to `chain` running as `module` until the guard drops.
    pub fn activate(&mut self, module: ModuleId, chain: ScopeChain) -> Activation<'_> {
        self.enter(module, chain, false)
    }

    fn enter(&mut self, module: ModuleId, chain: ScopeChain, is_call: bool) -> Activation<'_> {
        let saved_env = std::mem::replace(&mut self.env, chain);
        let saved_module = std::mem::replace(&mut self.module, module);
        if is_call {
            self.call_depth += 1;
        }
        Activation {
            interpreter: self,
            saved_env,
            saved_module,
            is_call,
        }
    }

    /// Run `f` against `chain` as `module`.
    pub fn with_activation<T, F>(&mut self, module: ModuleId, chain: ScopeChain, f: F) -> T
    where
        F: FnOnce(&mut Activation<'_>) -> T,
    {
        let mut active = self.activate(module, chain);
        f(&mut active)
    }

    /// Like [`with_activation`](Self::with_activation), counting one more
    /// level of call depth for the duration.
    pub(crate) fn with_call_activation<T, F>(
        &mut self,
        module: ModuleId,
        chain: ScopeChain,
        f: F,
    ) -> T
    where
        F: FnOnce(&mut Activation<'_>) -> T,
    {
        let mut active = self.enter(module, chain, true);
        f(&mut active)
    }
}
