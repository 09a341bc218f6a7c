//! Handler types: the polymorphic callable registered against a hook.

use std::{fmt, future::Future, pin::Pin, sync::Arc};

use {anyhow::Result, serde_json::Value};

/// A handler result that is not available yet.
pub type Deferred = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// What a single handler invocation produced: a value available now, or a
/// deferred one the caller must await.
pub enum HookOutput {
    Immediate(Value),
    Deferred(Deferred),
}

impl HookOutput {
    /// Returns true when this output must be awaited before use.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// The immediate value, if there is one.
    pub fn into_immediate(self) -> Option<Value> {
        match self {
            Self::Immediate(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    /// Resolve to a concrete value, awaiting a deferred output.
    pub async fn resolve(self) -> Result<Value> {
        match self {
            Self::Immediate(value) => Ok(value),
            Self::Deferred(fut) => fut.await,
        }
    }
}

impl fmt::Debug for HookOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// A unit of extension behavior registered against a hook name.
///
/// Handlers take zero-or-one input (series and parallel runs pass none,
/// waterfall passes the previous handler's output) and produce either an
/// immediate or a deferred value. A failing handler aborts the run that
/// invoked it.
pub trait Handler: Send + Sync {
    fn invoke(&self, input: Option<Value>) -> Result<HookOutput>;
}

/// Shared, type-erased handler as stored in the registry.
pub type SharedHandler = Arc<dyn Handler>;

struct SyncFn<F>(F);

impl<F> Handler for SyncFn<F>
where
    F: Fn(Option<Value>) -> Result<Value> + Send + Sync,
{
    fn invoke(&self, input: Option<Value>) -> Result<HookOutput> {
        (self.0)(input).map(HookOutput::Immediate)
    }
}

struct FutureFn<F>(F);

impl<F, Fut> Handler for FutureFn<F>
where
    F: Fn(Option<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    fn invoke(&self, input: Option<Value>) -> Result<HookOutput> {
        Ok(HookOutput::Deferred(Box::pin((self.0)(input))))
    }
}

/// Wrap a synchronous closure as a handler.
pub fn sync_fn<F>(f: F) -> SharedHandler
where
    F: Fn(Option<Value>) -> Result<Value> + Send + Sync + 'static,
{
    Arc::new(SyncFn(f))
}

/// Wrap a closure returning a future as a handler. The future is boxed at
/// invocation time; nothing runs until the output is awaited.
pub fn async_fn<F, Fut>(f: F) -> SharedHandler
where
    F: Fn(Option<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(FutureFn(f))
}
