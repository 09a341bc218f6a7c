//! Admin application bootstrap: the composer that owns the hook registry
//! and the settings/menu registration surface exposed to extensions.

pub mod app;
pub mod error;
pub mod menu;
pub mod settings;
pub mod well_known;

pub use {
    app::AdminApp,
    error::AppError,
    menu::{CORE_PLUGIN_ROUTES, Menu, MenuLink},
    settings::{GLOBAL_SECTION, Settings, SettingsLink, SettingsSection},
};
