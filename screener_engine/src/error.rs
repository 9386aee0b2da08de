use thiserror::Error;

/// The unified error type for the `screener_engine` crate.
///
/// Data conditions (missing history, missing fundamentals) are not errors
/// anywhere in the engine; the only failure surfaced to callers is an
/// invalid configuration, which is a programming mistake and fails fast.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller supplied configuration the engine cannot run with.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the supplied configuration.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            message: message.into(),
        }
    }
}
