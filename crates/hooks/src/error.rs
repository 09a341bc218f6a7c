use thiserror::Error;

/// Errors surfaced by the hook registry.
///
/// Running a hook that was never created is deliberately *not* an error:
/// extension points are optional, and an empty hook yields empty/identity
/// results.
#[derive(Debug, Error)]
pub enum HookError {
    /// Hook names must be non-empty.
    #[error("invalid hook name {0:?}")]
    InvalidName(String),

    /// A synchronous waterfall run hit a handler that produced a deferred
    /// value while more handlers were still queued. The next handler would
    /// receive an opaque placeholder instead of a value; use the awaited
    /// variant instead.
    #[error(
        "hook {hook:?}: handler #{handler} produced a deferred value in a synchronous waterfall"
    )]
    DeferredInSyncRun { hook: String, handler: usize },

    /// A handler failed. The error is propagated verbatim and aborts the
    /// run that invoked it.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

pub type Result<T, E = HookError> = std::result::Result<T, E>;
