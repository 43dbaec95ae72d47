//! Tree-walking interpreter.
//!
//! The interpreter owns everything that outlives a single statement: the
//! active scope chain and module, the module registry, the natives frame, the
//! loader and the evaluation limits. Node evaluation lives in `dispatch`;
//! calls, imports and the RAII guards that swap chains live in sibling
//! modules.

mod builder;
mod dispatch;
mod function_call;
mod import;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::{Activation, ScopedInterpreter};

use argon_ir::{Line, Node};

use crate::environment::{Binding, BindingSlot, Frame, LocalScope, ScopeChain};
use crate::errors::{Location, RunError};
use crate::loader::ModuleLoader;
use crate::native::{NativeFunction, NativeResult};
use crate::registry::{ModuleId, ModuleRegistry};
use crate::signal::{Outcome, Signal};
use crate::{EvalLimits, Value};

/// Result of running a statement sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    /// The terminal outcome, or `Normal` with the last statement's value.
    pub outcome: Outcome,
    /// One outcome per executed statement, in order. `Empty` statements are
    /// not recorded.
    pub trace: Vec<Outcome>,
}

/// Evaluates programs.
pub struct Interpreter {
    /// Active scope chain. Swapped wholesale for calls and module loads.
    pub(crate) env: ScopeChain,
    /// Module whose code is currently running; used for diagnostics, for
    /// the defining module of new functions, and as the import base.
    pub(crate) module: ModuleId,
    pub(crate) registry: ModuleRegistry,
    /// Root of every chain.
    pub(crate) natives: LocalScope<Frame>,
    pub(crate) loader: Box<dyn ModuleLoader>,
    pub(crate) limits: EvalLimits,
    /// Number of user function activations currently on the stack.
    pub(crate) call_depth: usize,
}

impl Interpreter {
    /// Identity of the interpreter's own top level, used by [`run`](Self::run)
    /// before any module has been entered.
    pub const MAIN: &'static str = "<main>";

    /// An interpreter with default limits, no natives and no loader.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub(crate) fn from_parts(limits: EvalLimits, loader: Box<dyn ModuleLoader>) -> Self {
        let natives = LocalScope::new(Frame::default());
        let module = ModuleId::new(Self::MAIN);
        let mut registry = ModuleRegistry::new();
        let top = registry.register(module.clone(), LocalScope::new(Frame::default()));
        Interpreter {
            env: ScopeChain::with_frames(natives.clone(), [top]),
            module,
            registry,
            natives,
            loader,
            limits,
            call_depth: 0,
        }
    }

    /// Add a native function to the natives frame.
    ///
    /// Natives are visible from every module and cannot be reassigned or
    /// redefined by programs. Registering a name twice replaces the earlier
    /// function.
    pub fn register_native<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&[Value]) -> NativeResult + 'static,
    {
        self.install_native(NativeFunction::new(name, func));
    }

    pub(crate) fn install_native(&mut self, func: NativeFunction) {
        tracing::debug!(name = %func.name, "registered native function");
        self.natives
            .borrow_mut()
            .insert(func.name.to_string(), Binding::native(func));
    }

    /// Run `program` against the active chain.
    ///
    /// Stops at the first statement whose signal is not `Normal` and returns
    /// that outcome. Otherwise the outcome is `Normal` carrying the last
    /// statement's value.
    pub fn run(&mut self, program: &[Node]) -> Run {
        let mut trace = Vec::with_capacity(program.len());
        let outcome = self.exec_sequence(program, Some(&mut trace));
        Run { outcome, trace }
    }

    /// Run `program` as `module` against `chain`, restoring the previous
    /// chain and module afterwards.
    pub fn run_in(&mut self, module: ModuleId, chain: ScopeChain, program: &[Node]) -> Run {
        self.with_activation(module, chain, |interp| interp.run(program))
    }

    /// Run `program` as the top level of module `identity`.
    ///
    /// The module's frame is registered before the first statement runs. If
    /// the identity is already registered, its existing frame is reused.
    pub fn run_module(&mut self, identity: impl Into<ModuleId>, program: &[Node]) -> Run {
        let identity = identity.into();
        let top = self
            .registry
            .register(identity.clone(), LocalScope::new(Frame::default()));
        let chain = self.module_chain(top);
        self.run_in(identity, chain, program)
    }

    /// Driver entry point: run a main module and report how it ended.
    pub fn run_main(
        &mut self,
        identity: impl Into<ModuleId>,
        program: &[Node],
    ) -> Result<Value, RunError> {
        let Run { outcome, .. } = self.run_module(identity, program);
        match outcome.signal {
            Signal::Normal | Signal::Return => Ok(outcome.value),
            Signal::Error => Err(RunError::Uncaught(outcome.value)),
            signal @ (Signal::Break | Signal::Continue) => {
                Err(RunError::StrayLoopControl { signal })
            }
        }
    }

    /// Chain for code running at a module's top level.
    pub(crate) fn module_chain(&self, top: LocalScope<Frame>) -> ScopeChain {
        ScopeChain::with_frames(self.natives.clone(), [top])
    }

    #[inline]
    pub(crate) fn loc(&self, line: Line) -> Location {
        Location::new(self.module.clone(), line)
    }

    /// Value bound to `name` in the active chain, if it is a plain binding.
    pub fn lookup_value(&self, name: &str) -> Option<Value> {
        self.env.lookup(name).and_then(|b| b.value().cloned())
    }

    /// Value bound to `name` at the top level of a loaded module.
    pub fn module_value(&self, module: &ModuleId, name: &str) -> Option<Value> {
        let top = self.registry.get(module)?;
        let frame = top.borrow();
        match &frame.get(name)?.slot {
            BindingSlot::Value(v) => Some(v.clone()),
            BindingSlot::Function(_) | BindingSlot::Native(_) => None,
        }
    }

    pub fn env(&self) -> &ScopeChain {
        &self.env
    }

    pub fn module(&self) -> &ModuleId {
        &self.module
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn limits(&self) -> EvalLimits {
        self.limits
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
