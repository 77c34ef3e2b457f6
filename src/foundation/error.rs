/// Result alias used across the crate.
pub type CanvasAnimResult<T> = Result<T, CanvasAnimError>;

/// Errors produced by slot pools, descriptor decoding, configuration and scripts.
#[derive(thiserror::Error, Debug)]
pub enum CanvasAnimError {
    /// A fixed-capacity pool had no free slot left.
    #[error("pool exhausted: '{pool}' has no free slot (capacity {capacity})")]
    PoolExhausted {
        /// Name of the pool that rejected the allocation.
        pool: &'static str,
        /// Configured capacity of that pool.
        capacity: usize,
    },

    /// A task descriptor record could not be decoded.
    #[error("descriptor error: {0}")]
    Descriptor(String),

    /// Invalid configuration or request parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasAnimError {
    /// Build a [`CanvasAnimError::PoolExhausted`].
    pub fn pool_exhausted(pool: &'static str, capacity: usize) -> Self {
        Self::PoolExhausted { pool, capacity }
    }

    /// Build a [`CanvasAnimError::Descriptor`].
    pub fn descriptor(msg: impl Into<String>) -> Self {
        Self::Descriptor(msg.into())
    }

    /// Build a [`CanvasAnimError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CanvasAnimError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for capacity rejections.
    pub fn is_pool_exhausted(&self) -> bool {
        matches!(self, Self::PoolExhausted { .. })
    }
}

impl From<serde_json::Error> for CanvasAnimError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
