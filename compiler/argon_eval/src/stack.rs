//! Native stack growth for deeply nested programs.
//!
//! Node evaluation recurses on the host stack. Every entry into
//! [`ensure_sufficient_stack`] checks the remaining space and moves onto a
//! freshly allocated segment when it runs low, so nesting depth is bounded by
//! [`EvalLimits`](crate::EvalLimits) rather than by the thread's stack size.

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Space that must stay free before evaluating another node (128KB).
    const RED_ZONE: usize = 128 * 1024;

    /// Size of each new stack segment (1MB).
    const SEGMENT: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// wasm manages its own stack; run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
