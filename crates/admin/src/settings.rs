//! Settings navigation registration: sections and their links.
//!
//! Sections are kept in creation order; the `global` section always exists
//! so extensions can contribute links without creating a section first.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// The section every app starts with.
pub const GLOBAL_SECTION: &str = "global";

/// A link inside a settings section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsLink {
    pub id: String,
    pub to: String,
    pub label: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl SettingsLink {
    pub fn new(id: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            to: to.into(),
            label: label.into(),
            permissions: Vec::new(),
        }
    }

    fn validate(&self, section: &str) -> Result<()> {
        if self.id.trim().is_empty() || self.to.trim().is_empty() || self.label.trim().is_empty() {
            return Err(AppError::InvalidSettingsLink {
                section: section.to_string(),
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// A named group of settings links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSection {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub links: Vec<SettingsLink>,
}

impl SettingsSection {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            links: Vec::new(),
        }
    }
}

/// Ordered settings sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    sections: Vec<SettingsSection>,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            sections: vec![SettingsSection::new(GLOBAL_SECTION, "Global Settings")],
        }
    }

    pub fn sections(&self) -> &[SettingsSection] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&SettingsSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn section_mut(&mut self, id: &str) -> Result<&mut SettingsSection> {
        self.sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::UnknownSection(id.to_string()))
    }

    /// Create a section with its initial links. Section ids are unique.
    pub fn create_section(
        &mut self,
        mut section: SettingsSection,
        links: Vec<SettingsLink>,
    ) -> Result<()> {
        if section.id.trim().is_empty() {
            return Err(AppError::InvalidSection);
        }
        if self.section(&section.id).is_some() {
            return Err(AppError::DuplicateSection(section.id));
        }
        for link in &links {
            link.validate(&section.id)?;
        }
        section.links.extend(links);
        self.sections.push(section);
        Ok(())
    }

    /// Append a link to an existing section.
    pub fn add_link(&mut self, section_id: &str, link: SettingsLink) -> Result<()> {
        link.validate(section_id)?;
        self.section_mut(section_id)?.links.push(link);
        Ok(())
    }

    /// Append several links to an existing section. Validates every link
    /// before mutating, so a bad batch leaves the section untouched.
    pub fn add_links(&mut self, section_id: &str, links: Vec<SettingsLink>) -> Result<()> {
        for link in &links {
            link.validate(section_id)?;
        }
        self.section_mut(section_id)?.links.extend(links);
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
