//! The hook registry: named extension points with three execution strategies.

use std::{collections::HashMap, sync::RwLock};

use {futures::future, serde_json::Value, tracing::debug};

use crate::{
    error::{HookError, Result},
    handler::{HookOutput, SharedHandler},
};

/// Named extension points, each holding an ordered list of handlers.
///
/// Registration order is execution order and result order. The registry is
/// process-scoped: construct one at bootstrap and hand a reference to every
/// collaborator that registers or runs hooks. Handlers are appended for the
/// lifetime of the process; there is no removal.
///
/// Run operations iterate a snapshot of the handler list taken before the
/// first invocation, so a handler that re-enters [`register`](Self::register)
/// never affects the run it is part of.
pub struct HookRegistry {
    hooks: RwLock<HashMap<String, Vec<SharedHandler>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
        }
    }

    fn validate(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(HookError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// Pre-declare an extension point. Idempotent: re-creating an existing
    /// hook keeps its handlers. Creation is a convenience for well-known
    /// hook names, not a precondition — running an uncreated hook yields
    /// empty/identity results.
    pub fn create_hook(&self, name: &str) -> Result<()> {
        Self::validate(name)?;
        let mut hooks = self.hooks.write().unwrap_or_else(|e| e.into_inner());
        hooks.entry(name.to_string()).or_default();
        debug!(hook = name, "hook created");
        Ok(())
    }

    /// Append a handler to a hook, creating the hook implicitly if absent.
    /// No duplicate detection: a handler registered twice runs twice.
    pub fn register(&self, name: &str, handler: SharedHandler) -> Result<()> {
        Self::validate(name)?;
        let mut hooks = self.hooks.write().unwrap_or_else(|e| e.into_inner());
        let handlers = hooks.entry(name.to_string()).or_default();
        handlers.push(handler);
        debug!(hook = name, count = handlers.len(), "hook handler registered");
        Ok(())
    }

    /// Names of all created or implicitly-created hooks, sorted.
    pub fn hook_names(&self) -> Vec<String> {
        let hooks = self.hooks.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = hooks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of handlers currently registered for a hook.
    pub fn handler_count(&self, name: &str) -> usize {
        let hooks = self.hooks.read().unwrap_or_else(|e| e.into_inner());
        hooks.get(name).map_or(0, Vec::len)
    }

    /// Stable snapshot of a hook's handler list.
    fn snapshot(&self, name: &str) -> Vec<SharedHandler> {
        let hooks = self.hooks.read().unwrap_or_else(|e| e.into_inner());
        hooks.get(name).cloned().unwrap_or_default()
    }

    /// Invoke every handler in registration order with no input and collect
    /// their outputs. Deferred outputs are collected verbatim, *not*
    /// awaited — callers registering asynchronous handlers want
    /// [`run_series_awaited`](Self::run_series_awaited). The first handler
    /// failure aborts the run.
    pub fn run_series(&self, name: &str) -> Result<Vec<HookOutput>> {
        let handlers = self.snapshot(name);
        debug!(hook = name, count = handlers.len(), "running hook series");
        let mut outputs = Vec::with_capacity(handlers.len());
        for handler in &handlers {
            outputs.push(handler.invoke(None)?);
        }
        Ok(outputs)
    }

    /// Series with each output awaited directly after its handler is
    /// invoked: execution stays sequential and non-overlapping even for
    /// deferred handlers. Results preserve registration order.
    pub async fn run_series_awaited(&self, name: &str) -> Result<Vec<Value>> {
        let handlers = self.snapshot(name);
        debug!(hook = name, count = handlers.len(), "running hook series (awaited)");
        let mut values = Vec::with_capacity(handlers.len());
        for handler in &handlers {
            values.push(handler.invoke(None)?.resolve().await?);
        }
        Ok(values)
    }

    /// Thread `initial` through the chain: handler *i* receives handler
    /// *i-1*'s output, and the last handler's output is the result. With no
    /// handlers the input comes back unchanged.
    ///
    /// Only the final handler may produce a deferred value (returned
    /// verbatim); a deferred mid-chain is rejected as caller misuse because
    /// the next handler needs a concrete value. Use
    /// [`run_waterfall_awaited`](Self::run_waterfall_awaited) when handlers
    /// may be asynchronous.
    pub fn run_waterfall(&self, name: &str, initial: Value) -> Result<HookOutput> {
        let handlers = self.snapshot(name);
        debug!(hook = name, count = handlers.len(), "running hook waterfall");
        let mut current = initial;
        for (i, handler) in handlers.iter().enumerate() {
            match handler.invoke(Some(current))? {
                HookOutput::Immediate(value) => current = value,
                HookOutput::Deferred(fut) if i + 1 == handlers.len() => {
                    return Ok(HookOutput::Deferred(fut));
                }
                HookOutput::Deferred(_) => {
                    return Err(HookError::DeferredInSyncRun {
                        hook: name.to_string(),
                        handler: i,
                    });
                }
            }
        }
        Ok(HookOutput::Immediate(current))
    }

    /// Waterfall with every intermediate result awaited before the next
    /// handler runs, so handlers never overlap even when deferred.
    pub async fn run_waterfall_awaited(&self, name: &str, initial: Value) -> Result<Value> {
        let handlers = self.snapshot(name);
        debug!(hook = name, count = handlers.len(), "running hook waterfall (awaited)");
        let mut current = initial;
        for handler in &handlers {
            current = handler.invoke(Some(current))?.resolve().await?;
        }
        Ok(current)
    }

    /// Invoke every handler before awaiting anything (start order is
    /// registration order), then await them together. The result sequence
    /// preserves registration order regardless of completion order; the
    /// first failure aborts the aggregate wait.
    pub async fn run_parallel(&self, name: &str) -> Result<Vec<Value>> {
        let handlers = self.snapshot(name);
        debug!(hook = name, count = handlers.len(), "running hook parallel");
        let mut started = Vec::with_capacity(handlers.len());
        for handler in &handlers {
            started.push(match handler.invoke(None)? {
                HookOutput::Immediate(value) => future::Either::Left(future::ready(Ok(value))),
                HookOutput::Deferred(fut) => future::Either::Right(fut),
            });
        }
        Ok(future::try_join_all(started).await?)
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use serde_json::{Value, json};

    use {
        super::*,
        crate::handler::{async_fn, sync_fn},
    };

    fn num(input: Option<Value>) -> i64 {
        input.and_then(|v| v.as_i64()).unwrap_or(0)
    }

    #[test]
    fn unknown_hook_series_is_empty() {
        let registry = HookRegistry::new();
        assert!(registry.run_series("never-created").unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_hook_parallel_is_empty() {
        let registry = HookRegistry::new();
        assert!(registry.run_parallel("never-created").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_hook_waterfall_returns_input_unchanged() {
        let registry = HookRegistry::new();
        let out = registry.run_waterfall("never-created", json!({"menu": []})).unwrap();
        assert_eq!(out.into_immediate().unwrap(), json!({"menu": []}));

        let awaited = registry
            .run_waterfall_awaited("never-created", json!(41))
            .await
            .unwrap();
        assert_eq!(awaited, json!(41));
    }

    #[test]
    fn series_collects_results_in_registration_order() {
        let registry = HookRegistry::new();
        registry.create_hook("hello").unwrap();
        registry.create_hook("moto").unwrap();

        registry.register("hello", sync_fn(|_| Ok(json!(5)))).unwrap();
        registry.register("moto", sync_fn(|_| Ok(json!(1)))).unwrap();
        registry.register("moto", sync_fn(|_| Ok(json!(2)))).unwrap();
        registry.register("moto", sync_fn(|_| Ok(json!(3)))).unwrap();

        let values: Vec<Value> = registry
            .run_series("moto")
            .unwrap()
            .into_iter()
            .map(|o| o.into_immediate().unwrap())
            .collect();
        assert_eq!(values, vec![json!(1), json!(2), json!(3)]);
    }

    #[tokio::test]
    async fn series_awaited_normalizes_deferred_handlers() {
        let registry = HookRegistry::new();
        registry.register("moto", sync_fn(|_| Ok(json!(1)))).unwrap();
        registry
            .register("moto", async_fn(|_| async { Ok(json!(2)) }))
            .unwrap();
        registry.register("moto", sync_fn(|_| Ok(json!(3)))).unwrap();

        let values = registry.run_series_awaited("moto").await.unwrap();
        assert_eq!(values, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn sync_series_passes_deferred_outputs_through_verbatim() {
        let registry = HookRegistry::new();
        registry.register("moto", sync_fn(|_| Ok(json!(1)))).unwrap();
        registry
            .register("moto", async_fn(|_| async { Ok(json!(2)) }))
            .unwrap();

        let outputs = registry.run_series("moto").unwrap();
        assert_eq!(outputs.len(), 2);
        assert!(!outputs[0].is_deferred());
        assert!(outputs[1].is_deferred());
    }

    #[test]
    fn waterfall_threads_value_through_chain() {
        let registry = HookRegistry::new();
        registry
            .register("moto", sync_fn(|n| Ok(json!(num(n) + 1))))
            .unwrap();
        registry
            .register("moto", sync_fn(|n| Ok(json!(num(n) + 2))))
            .unwrap();
        registry
            .register("moto", sync_fn(|n| Ok(json!(num(n) + 3))))
            .unwrap();

        let out = registry.run_waterfall("moto", json!(1)).unwrap();
        assert_eq!(out.into_immediate().unwrap(), json!(7));
    }

    #[tokio::test]
    async fn waterfall_awaited_resolves_deferred_intermediates() {
        let registry = HookRegistry::new();
        registry
            .register("moto", sync_fn(|n| Ok(json!(num(n) + 1))))
            .unwrap();
        registry
            .register("moto", async_fn(|n| async move { Ok(json!(num(n) + 2)) }))
            .unwrap();
        registry
            .register("moto", sync_fn(|n| Ok(json!(num(n) + 3))))
            .unwrap();

        let out = registry.run_waterfall_awaited("moto", json!(1)).await.unwrap();
        assert_eq!(out, json!(7));
    }

    #[test]
    fn sync_waterfall_rejects_deferred_mid_chain() {
        let registry = HookRegistry::new();
        registry
            .register("moto", sync_fn(|n| Ok(json!(num(n) + 1))))
            .unwrap();
        registry
            .register("moto", async_fn(|n| async move { Ok(json!(num(n) + 2)) }))
            .unwrap();
        registry
            .register("moto", sync_fn(|n| Ok(json!(num(n) + 3))))
            .unwrap();

        let err = registry.run_waterfall("moto", json!(1)).unwrap_err();
        match err {
            HookError::DeferredInSyncRun { hook, handler } => {
                assert_eq!(hook, "moto");
                assert_eq!(handler, 1);
            }
            other => panic!("expected DeferredInSyncRun, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sync_waterfall_returns_trailing_deferred_verbatim() {
        let registry = HookRegistry::new();
        registry
            .register("moto", sync_fn(|n| Ok(json!(num(n) + 1))))
            .unwrap();
        registry
            .register("moto", async_fn(|n| async move { Ok(json!(num(n) + 2)) }))
            .unwrap();

        let out = registry.run_waterfall("moto", json!(1)).unwrap();
        assert!(out.is_deferred());
        assert_eq!(out.resolve().await.unwrap(), json!(4));
    }

    #[tokio::test]
    async fn parallel_preserves_registration_order_under_reversed_completion() {
        let registry = HookRegistry::new();
        for (delay_ms, value) in [(30_u64, 1), (20, 2), (10, 3)] {
            registry
                .register(
                    "stats",
                    async_fn(move |_| async move {
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        Ok(json!(value))
                    }),
                )
                .unwrap();
        }

        let values = registry.run_parallel("stats").await.unwrap();
        assert_eq!(values, vec![json!(1), json!(2), json!(3)]);
    }

    #[tokio::test]
    async fn parallel_mixes_immediate_and_deferred_handlers() {
        let registry = HookRegistry::new();
        registry.register("stats", sync_fn(|_| Ok(json!(1)))).unwrap();
        registry
            .register("stats", async_fn(|_| async { Ok(json!(2)) }))
            .unwrap();
        registry.register("stats", sync_fn(|_| Ok(json!(3)))).unwrap();

        let values = registry.run_parallel("stats").await.unwrap();
        assert_eq!(values, vec![json!(1), json!(2), json!(3)]);
    }

    #[tokio::test]
    async fn parallel_aborts_on_first_failure() {
        let registry = HookRegistry::new();
        registry.register("stats", sync_fn(|_| Ok(json!(1)))).unwrap();
        registry
            .register("stats", async_fn(|_| async { anyhow::bail!("boom") }))
            .unwrap();

        let err = registry.run_parallel("stats").await.unwrap_err();
        assert!(matches!(err, HookError::Handler(_)));
    }

    #[test]
    fn failing_handler_aborts_series_fail_fast() {
        let registry = HookRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = Arc::clone(&calls);
        registry
            .register(
                "jobs",
                sync_fn(move |_| {
                    first.fetch_add(1, Ordering::SeqCst);
                    Ok(json!("ok"))
                }),
            )
            .unwrap();
        registry
            .register("jobs", sync_fn(|_| anyhow::bail!("broken handler")))
            .unwrap();
        let third = Arc::clone(&calls);
        registry
            .register(
                "jobs",
                sync_fn(move |_| {
                    third.fetch_add(1, Ordering::SeqCst);
                    Ok(json!("never"))
                }),
            )
            .unwrap();

        let err = registry.run_series("jobs").unwrap_err();
        assert!(matches!(err, HookError::Handler(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reentrant_registration_is_invisible_to_inflight_run() {
        let registry = Arc::new(HookRegistry::new());

        let inner = Arc::clone(&registry);
        registry
            .register(
                "boot",
                sync_fn(move |_| {
                    inner.register("boot", sync_fn(|_| Ok(json!("late"))))?;
                    Ok(json!("early"))
                }),
            )
            .unwrap();

        let first_run = registry.run_series("boot").unwrap();
        assert_eq!(first_run.len(), 1);

        // The reentrant registration is visible to the next run, which
        // snapshots two handlers (and appends another "late" while running).
        assert_eq!(registry.handler_count("boot"), 2);
        let second_run = registry.run_series("boot").unwrap();
        assert_eq!(second_run.len(), 2);
        assert_eq!(registry.handler_count("boot"), 3);
    }

    #[test]
    fn duplicate_handler_registration_runs_twice() {
        let registry = HookRegistry::new();
        let handler = sync_fn(|_| Ok(json!("again")));
        registry.register("moto", Arc::clone(&handler)).unwrap();
        registry.register("moto", handler).unwrap();

        assert_eq!(registry.run_series("moto").unwrap().len(), 2);
    }

    #[test]
    fn create_hook_is_idempotent_and_keeps_handlers() {
        let registry = HookRegistry::new();
        registry.create_hook("moto").unwrap();
        registry.register("moto", sync_fn(|_| Ok(json!(1)))).unwrap();
        registry.create_hook("moto").unwrap();

        assert_eq!(registry.handler_count("moto"), 1);
        assert_eq!(registry.hook_names(), vec!["moto".to_string()]);
    }

    #[test]
    fn blank_names_are_rejected() {
        let registry = HookRegistry::new();
        assert!(matches!(
            registry.create_hook(""),
            Err(HookError::InvalidName(_))
        ));
        assert!(matches!(
            registry.register("   ", sync_fn(|_| Ok(json!(1)))),
            Err(HookError::InvalidName(_))
        ));
        assert_eq!(registry.hook_names(), Vec::<String>::new());
    }
}
