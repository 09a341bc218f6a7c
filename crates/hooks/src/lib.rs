//! Named extension points for the admin bootstrap.
//!
//! A [`HookRegistry`] maps hook names to ordered handler lists and offers
//! three execution strategies: series (collect independent results),
//! waterfall (thread one value through the chain), and parallel (start all,
//! await together). Extensions register handlers while they load; the
//! bootstrap composer runs hooks at defined lifecycle moments.

pub mod error;
pub mod handler;
pub mod registry;

pub use {
    error::HookError,
    handler::{Deferred, Handler, HookOutput, SharedHandler, async_fn, sync_fn},
    registry::HookRegistry,
};
