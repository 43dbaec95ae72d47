//! Module loading boundary.
//!
//! The evaluator does not know how an import path becomes a program. A
//! [`ModuleLoader`] turns `(path, base_dir)` into a module identity plus its
//! parsed top level; the interpreter then evaluates it once and registers its
//! frame.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use argon_ir::Node;
use rustc_hash::FxHashMap;

use crate::registry::ModuleId;

/// A resolved module, ready to run.
#[derive(Clone, Debug)]
pub struct ModuleSource {
    pub identity: ModuleId,
    pub program: Rc<[Node]>,
}

/// Loader-level failure. Surfaces to programs as an import failure.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("module '{path}' not found")]
    NotFound { path: String },

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("imports are not available (importing '{path}')")]
    Disabled { path: String },
}

/// Resolves import paths to programs.
pub trait ModuleLoader {
    /// Resolve `path` as written in an import, relative to `base_dir` (the
    /// directory of the importing module).
    ///
    /// The returned identity must be canonical: two imports naming the same
    /// module must yield equal identities, or the module runs twice.
    fn resolve(&self, path: &str, base_dir: &Path) -> Result<ModuleSource, ImportError>;
}

/// Lexically resolve `.` and `..` components.
///
/// `..` at the start of a relative path is kept, since there is nothing to
/// pop.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let poppable = matches!(
                    result.components().next_back(),
                    Some(Component::Normal(_))
                );
                if poppable {
                    result.pop();
                } else if !result.has_root() {
                    result.push(component);
                }
            }
            _ => result.push(component),
        }
    }
    result
}

/// Join and normalize, rendering with `/` separators for stable identities.
fn resolve_key(path: &str, base_dir: &Path) -> String {
    normalize_path(&base_dir.join(path))
        .to_string_lossy()
        .replace('\\', "/")
}

/// Pre-parsed programs keyed by normalized path.
///
/// Used by embedders that parse everything up front, and by tests.
#[derive(Default)]
pub struct MemoryLoader {
    modules: FxHashMap<String, Rc<[Node]>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        MemoryLoader::default()
    }

    /// Make `program` importable as `path` (relative to `.`).
    pub fn insert(&mut self, path: &str, program: Vec<Node>) {
        self.modules
            .insert(resolve_key(path, Path::new(".")), Rc::from(program));
    }

    #[must_use]
    pub fn with(mut self, path: &str, program: Vec<Node>) -> Self {
        self.insert(path, program);
        self
    }
}

impl fmt::Debug for MemoryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.modules.keys().collect();
        keys.sort();
        f.debug_struct("MemoryLoader").field("modules", &keys).finish()
    }
}

impl ModuleLoader for MemoryLoader {
    fn resolve(&self, path: &str, base_dir: &Path) -> Result<ModuleSource, ImportError> {
        let key = resolve_key(path, base_dir);
        match self.modules.get(&key) {
            Some(program) => Ok(ModuleSource {
                identity: ModuleId::from(key),
                program: Rc::clone(program),
            }),
            None => Err(ImportError::NotFound { path: key }),
        }
    }
}

/// Signature of the parser a [`SourceLoader`] hands file text to.
pub type ParseFn = dyn Fn(&str) -> Result<Vec<Node>, String>;

/// Reads modules from disk and parses them with an injected parser.
///
/// Identities are canonical filesystem paths, so different spellings of the
/// same file share one registry entry.
pub struct SourceLoader {
    parse: Box<ParseFn>,
}

impl SourceLoader {
    pub fn new<P>(parse: P) -> Self
    where
        P: Fn(&str) -> Result<Vec<Node>, String> + 'static,
    {
        SourceLoader {
            parse: Box::new(parse),
        }
    }
}

impl fmt::Debug for SourceLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceLoader").finish_non_exhaustive()
    }
}

impl ModuleLoader for SourceLoader {
    fn resolve(&self, path: &str, base_dir: &Path) -> Result<ModuleSource, ImportError> {
        let joined = base_dir.join(path);
        let canonical = match std::fs::canonicalize(&joined) {
            Ok(canonical) => canonical,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(ImportError::NotFound {
                    path: joined.display().to_string(),
                });
            }
            Err(source) => return Err(ImportError::Io { path: joined, source }),
        };
        let text = std::fs::read_to_string(&canonical).map_err(|source| ImportError::Io {
            path: canonical.clone(),
            source,
        })?;
        let identity = canonical.display().to_string();
        tracing::debug!(module = %identity, bytes = text.len(), "read module source");
        let program = (self.parse)(&text).map_err(|message| ImportError::Parse {
            path: identity.clone(),
            message,
        })?;
        Ok(ModuleSource {
            identity: ModuleId::from(identity),
            program: Rc::from(program),
        })
    }
}

/// Rejects every import.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLoader;

impl ModuleLoader for NoLoader {
    fn resolve(&self, path: &str, _base_dir: &Path) -> Result<ModuleSource, ImportError> {
        Err(ImportError::Disabled {
            path: path.to_string(),
        })
    }
}
