//! Well-known extension point names, created before any extension loads.
//!
//! Extensions may also create their own hooks; these are the ones the
//! bootstrap itself runs at defined lifecycle moments.

/// Waterfall over the serialized main menu before first render.
pub const MUTATE_MENU: &str = "admin/menu/mutate";

/// Waterfall over the serialized settings sections before first render.
pub const MUTATE_SETTINGS: &str = "admin/settings/mutate";

/// Series run at the end of bootstrap, before first render.
pub const BEFORE_RENDER: &str = "admin/before-render";

pub const ALL: &[&str] = &[MUTATE_MENU, MUTATE_SETTINGS, BEFORE_RENDER];
