/// Convenience result type used across snowtrail.
pub type SnowResult<T> = Result<T, SnowError>;

/// Top-level error taxonomy.
///
/// Every variant is terminal for a run: nothing inside the per-step pipeline can fail, so there is
/// no recoverable category.
#[derive(thiserror::Error, Debug)]
pub enum SnowError {
    /// The activity data provider failed or returned a grid that is empty or not rectangular.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// A required image could not be read or decoded.
    #[error("asset missing: {0}")]
    AssetMissing(String),

    /// Output could not be persisted by the frame sink.
    #[error("sink write failure: {0}")]
    SinkWrite(String),

    /// Invalid configuration or API misuse (zero sizes, out-of-order frames).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnowError {
    /// Build a [`SnowError::DataUnavailable`] value.
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    /// Build a [`SnowError::AssetMissing`] value.
    pub fn asset_missing(msg: impl Into<String>) -> Self {
        Self::AssetMissing(msg.into())
    }

    /// Build a [`SnowError::SinkWrite`] value.
    pub fn sink_write(msg: impl Into<String>) -> Self {
        Self::SinkWrite(msg.into())
    }

    /// Build a [`SnowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
