use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("extension {0:?} is queued twice")]
    DuplicateExtension(String),

    #[error("extension {id:?} failed to register")]
    Extension {
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T, E = LoaderError> = std::result::Result<T, E>;
