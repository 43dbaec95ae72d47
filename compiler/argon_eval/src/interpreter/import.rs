//! Import statements.

use argon_ir::{Line, Node};

use super::Interpreter;
use crate::environment::{Binding, Frame, LocalScope};
use crate::errors::{import_failure, invalid_import_path, Location};
use crate::registry::ModuleId;
use crate::signal::{settle, Outcome};
use crate::Value;

impl Interpreter {
    /// `import path` or `import path (a, b)`.
    ///
    /// Copies the selected top-level bindings of the imported module (all of
    /// them when there is no selection) into the innermost frame. Functions
    /// keep their defining module, so calling them later still runs against
    /// the module they came from.
    pub(super) fn eval_import(
        &mut self,
        path: &Node,
        selected: Option<&[String]>,
        line: Line,
    ) -> Outcome {
        settle(self.eval_import_inner(path, selected, line))
    }

    fn eval_import_inner(
        &mut self,
        path: &Node,
        selected: Option<&[String]>,
        line: Line,
    ) -> Result<Outcome, Outcome> {
        let loc = self.loc(line);
        let path = self.eval_node(path).value_unless_error()?;
        let Value::String(path) = &path else {
            return Err(invalid_import_path(&path, &loc).into());
        };

        let (identity, top) = self.load_module(path, &loc)?;

        let bindings: Vec<(String, Binding)> = {
            let exported = top.borrow();
            match selected {
                None => exported
                    .iter()
                    .map(|(name, binding)| (name.clone(), binding.clone()))
                    .collect(),
                Some(names) => {
                    let mut picked = Vec::with_capacity(names.len());
                    for name in names {
                        let Some(binding) = exported.get(name) else {
                            let reason = format!("module '{identity}' has no binding '{name}'");
                            return Err(import_failure(reason, &loc).into());
                        };
                        picked.push((name.clone(), binding.clone()));
                    }
                    picked
                }
            }
        };

        for (name, binding) in bindings {
            self.env.declare(name, binding);
        }
        Ok(Outcome::nil())
    }

    /// Resolve a module and make sure it has run.
    ///
    /// A module already in the registry is not run again. A new module's
    /// frame is registered before its first statement runs, so an import
    /// cycle sees the partially initialized frame instead of looping. A
    /// module whose top level raises is unregistered again.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path))]
    fn load_module(
        &mut self,
        path: &str,
        loc: &Location,
    ) -> Result<(ModuleId, LocalScope<Frame>), Outcome> {
        let source = self
            .loader
            .resolve(path, self.module.base_dir())
            .map_err(|err| Outcome::from(import_failure(err, loc)))?;

        if let Some(top) = self.registry.get(&source.identity) {
            tracing::trace!(module = %source.identity, "module already loaded");
            return Ok((source.identity, top));
        }

        let top = self
            .registry
            .register(source.identity.clone(), LocalScope::new(Frame::default()));
        let chain = self.module_chain(top.clone());
        let run = self.run_in(source.identity.clone(), chain, &source.program);
        if run.outcome.is_error() {
            self.registry.remove(&source.identity);
            return Err(import_failure(&run.outcome.value, loc).into());
        }
        Ok((source.identity, top))
    }
}
