//! The admin application bootstrap object.

use std::sync::Arc;

use {
    quill_hooks::{HookOutput, HookRegistry, SharedHandler},
    serde_json::Value,
    tracing::{debug, info},
};

use crate::{
    error::Result,
    menu::{Menu, MenuLink},
    settings::{Settings, SettingsLink, SettingsSection},
    well_known,
};

/// The bootstrap composer: owns the hook registry, the settings tree, and
/// the main menu.
///
/// One instance is constructed at process start and handed to every
/// extension during load; there is no ambient singleton. Extensions mutate
/// the app through the registration methods below, and the bootstrap runs
/// the well-known hooks at defined lifecycle moments so extensions can
/// observe or transform bootstrap data before first render.
pub struct AdminApp {
    hooks: Arc<HookRegistry>,
    settings: Settings,
    menu: Menu,
}

impl AdminApp {
    /// Create the app with the well-known extension points pre-declared.
    pub fn new() -> Self {
        let hooks = Arc::new(HookRegistry::new());
        for name in well_known::ALL {
            // Well-known names are static and never blank.
            let _ = hooks.create_hook(name);
        }
        Self {
            hooks,
            settings: Settings::new(),
            menu: Menu::default(),
        }
    }

    // ── Hook API ────────────────────────────────────────────────────────────

    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    pub fn create_hook(&self, name: &str) -> Result<()> {
        Ok(self.hooks.create_hook(name)?)
    }

    pub fn register_hook(&self, name: &str, handler: SharedHandler) -> Result<()> {
        Ok(self.hooks.register(name, handler)?)
    }

    pub fn run_hook_series(&self, name: &str) -> Result<Vec<HookOutput>> {
        Ok(self.hooks.run_series(name)?)
    }

    pub async fn run_hook_series_awaited(&self, name: &str) -> Result<Vec<Value>> {
        Ok(self.hooks.run_series_awaited(name).await?)
    }

    pub fn run_hook_waterfall(&self, name: &str, initial: Value) -> Result<HookOutput> {
        Ok(self.hooks.run_waterfall(name, initial)?)
    }

    pub async fn run_hook_waterfall_awaited(&self, name: &str, initial: Value) -> Result<Value> {
        Ok(self.hooks.run_waterfall_awaited(name, initial).await?)
    }

    pub async fn run_hook_parallel(&self, name: &str) -> Result<Vec<Value>> {
        Ok(self.hooks.run_parallel(name).await?)
    }

    // ── Settings API ────────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn create_settings_section(
        &mut self,
        section: SettingsSection,
        links: Vec<SettingsLink>,
    ) -> Result<()> {
        let id = section.id.clone();
        self.settings.create_section(section, links)?;
        debug!(section = id, "settings section created");
        Ok(())
    }

    pub fn add_settings_link(&mut self, section_id: &str, link: SettingsLink) -> Result<()> {
        self.settings.add_link(section_id, link)
    }

    pub fn add_settings_links(
        &mut self,
        section_id: &str,
        links: Vec<SettingsLink>,
    ) -> Result<()> {
        self.settings.add_links(section_id, links)
    }

    // ── Menu API ────────────────────────────────────────────────────────────

    pub fn menu(&self) -> &[MenuLink] {
        self.menu.links()
    }

    pub fn add_menu_link(&mut self, link: MenuLink) -> Result<()> {
        self.menu.add_link(link)
    }

    pub fn add_core_plugin_menu_link(&mut self, link: MenuLink) -> Result<()> {
        self.menu.add_core_plugin_link(link)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    /// The menu after the mutate-menu waterfall has run over it, letting
    /// extensions reorder, relabel, or append links before first render.
    pub async fn resolved_menu(&self) -> Result<Vec<MenuLink>> {
        let initial = serde_json::to_value(self.menu.links())?;
        let value = self
            .hooks
            .run_waterfall_awaited(well_known::MUTATE_MENU, initial)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// The settings tree after the mutate-settings waterfall has run.
    pub async fn resolved_settings(&self) -> Result<Settings> {
        let initial = serde_json::to_value(&self.settings)?;
        let value = self
            .hooks
            .run_waterfall_awaited(well_known::MUTATE_SETTINGS, initial)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Run the before-render series. A failing handler aborts startup; no
    /// recovery is attempted.
    pub async fn bootstrap(&self) -> Result<()> {
        info!(
            menu_links = self.menu.links().len(),
            settings_sections = self.settings.sections().len(),
            "running admin bootstrap hooks"
        );
        self.hooks
            .run_series_awaited(well_known::BEFORE_RENDER)
            .await?;
        Ok(())
    }
}

impl Default for AdminApp {
    fn default() -> Self {
        Self::new()
    }
}
