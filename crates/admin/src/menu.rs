//! Main navigation menu registration.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Routes that core plugins are allowed to claim in the menu.
pub const CORE_PLUGIN_ROUTES: &[&str] = &[
    "/plugins/content-manager",
    "/plugins/content-type-builder",
    "/plugins/media-library",
    "/plugins/documentation",
];

/// A link contributed to the main navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLink {
    pub to: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl MenuLink {
    pub fn new(to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            label: label.into(),
            icon: String::new(),
            permissions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.to.trim().is_empty() || self.label.trim().is_empty() {
            return Err(AppError::InvalidMenuLink {
                to: self.to.clone(),
                label: self.label.clone(),
            });
        }
        Ok(())
    }
}

/// The main navigation menu, links kept in registration order.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Menu {
    links: Vec<MenuLink>,
}

impl Menu {
    pub fn add_link(&mut self, link: MenuLink) -> Result<()> {
        link.validate()?;
        self.links.push(link);
        Ok(())
    }

    /// Core plugins register through a fixed route allow-list; anything
    /// else must use [`add_link`](Self::add_link).
    pub fn add_core_plugin_link(&mut self, link: MenuLink) -> Result<()> {
        if !CORE_PLUGIN_ROUTES.contains(&link.to.as_str()) {
            return Err(AppError::NotCorePluginRoute(link.to));
        }
        self.add_link(link)
    }

    pub fn links(&self) -> &[MenuLink] {
        &self.links
    }
}
