//! Evaluation limits.

/// Bounds on runaway programs. Exceeding either raises a catchable error
/// instead of exhausting the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalLimits {
    /// Maximum number of nested user function activations.
    pub max_call_depth: usize,
    /// Maximum number of `FunctionRef` hops when resolving a call target.
    pub max_alias_depth: usize,
}

impl EvalLimits {
    pub const DEFAULT_CALL_DEPTH: usize = 10_000;
    pub const DEFAULT_ALIAS_DEPTH: usize = 64;

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn with_max_alias_depth(mut self, depth: usize) -> Self {
        self.max_alias_depth = depth;
        self
    }
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_call_depth: Self::DEFAULT_CALL_DEPTH,
            max_alias_depth: Self::DEFAULT_ALIAS_DEPTH,
        }
    }
}
