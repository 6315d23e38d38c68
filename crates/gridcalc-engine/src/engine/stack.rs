//! Stack growth for deep reference chains.
//!
//! A chain of references can be as long as the grid, so recursive
//! resolution grows the native stack on demand instead of overflowing it.

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available.
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing.
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
