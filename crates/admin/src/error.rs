use {quill_hooks::HookError, thiserror::Error};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown settings section {0:?}")]
    UnknownSection(String),

    #[error("settings section {0:?} already exists")]
    DuplicateSection(String),

    #[error("settings sections need a non-empty id")]
    InvalidSection,

    #[error("settings link {id:?} in section {section:?} needs non-empty `id`, `to` and `label`")]
    InvalidSettingsLink { section: String, id: String },

    #[error("menu link needs a non-empty `to` and `label` (to={to:?}, label={label:?})")]
    InvalidMenuLink { to: String, label: String },

    #[error("{0:?} is not a core plugin route")]
    NotCorePluginRoute(String),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error("serializing bootstrap data for hooks: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
