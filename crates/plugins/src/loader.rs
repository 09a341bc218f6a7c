//! The extension loader: registers extensions against the app in load order.

use std::collections::HashSet;

use {
    quill_admin::AdminApp,
    tracing::{debug, info},
};

use crate::error::{LoaderError, Result};

/// An independently-authored admin extension.
///
/// [`register`](Self::register) runs once during bootstrap, before first
/// render; it is where the extension contributes hook handlers, settings
/// links, and menu links.
pub trait Extension: Send + Sync {
    fn id(&self) -> &str;

    fn register(&self, app: &mut AdminApp) -> anyhow::Result<()>;
}

/// Loads extensions in the order they were queued.
#[derive(Default)]
pub struct ExtensionLoader {
    extensions: Vec<Box<dyn Extension>>,
}

impl ExtensionLoader {
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    /// Queue an extension. Load order is queue order.
    pub fn add(&mut self, extension: Box<dyn Extension>) -> &mut Self {
        self.extensions.push(extension);
        self
    }

    /// Register every queued extension against the app, in order.
    ///
    /// Duplicate ids and extension failures abort the load: a broken
    /// extension is a startup failure, not something to skip past.
    pub fn load_all(&self, app: &mut AdminApp) -> Result<()> {
        let mut seen = HashSet::new();
        for extension in &self.extensions {
            let id = extension.id();
            if !seen.insert(id.to_string()) {
                return Err(LoaderError::DuplicateExtension(id.to_string()));
            }
            debug!(extension = id, "registering extension");
            extension
                .register(app)
                .map_err(|source| LoaderError::Extension {
                    id: id.to_string(),
                    source,
                })?;
        }
        info!(count = self.extensions.len(), "extensions loaded");
        Ok(())
    }
}
