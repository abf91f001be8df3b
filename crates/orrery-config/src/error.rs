//! Failures around `config.ron` persistence.

/// What can go wrong loading or persisting `config.ron`.
///
/// Read and parse failures are recoverable at startup (the viewer falls
/// back to defaults); write failures only matter when saving.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `config.ron` exists but could not be read.
    #[error("could not read config.ron: {0}")]
    Read(#[source] std::io::Error),

    /// The config directory or `config.ron` could not be written.
    #[error("could not write config.ron: {0}")]
    Write(#[source] std::io::Error),

    /// `config.ron` is not valid RON for this schema.
    #[error("config.ron is malformed: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// The in-memory config failed to serialize to RON.
    #[error("could not serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
