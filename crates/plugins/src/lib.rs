//! Extension loading for the admin app.
//!
//! Extensions are independently-authored units that contribute hook
//! handlers, settings links, and menu links during bootstrap. The loader
//! registers them against the [`AdminApp`](quill_admin::AdminApp) in load
//! order, before first render.

pub mod error;
pub mod loader;

pub use {
    error::LoaderError,
    loader::{Extension, ExtensionLoader},
};
