use crate::foundation::error::{CanvasAnimError, CanvasAnimResult};

/// Options fixed for the lifetime of a [`crate::CanvasAnimator`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerOpts {
    /// Length of every slot pool, i.e. how many animations can be in flight at once.
    ///
    /// Size this from [`crate::CanvasAnimator::peak_concurrent_animations`] (or one above it).
    pub max_concurrent_animations: usize,
}

impl Default for SchedulerOpts {
    fn default() -> Self {
        Self {
            max_concurrent_animations: 32,
        }
    }
}

impl SchedulerOpts {
    /// Options with the given capacity.
    pub fn with_capacity(max_concurrent_animations: usize) -> Self {
        Self {
            max_concurrent_animations,
        }
    }

    /// Reject unusable configurations.
    pub fn validate(&self) -> CanvasAnimResult<()> {
        if self.max_concurrent_animations == 0 {
            return Err(CanvasAnimError::validation(
                "max_concurrent_animations must be > 0",
            ));
        }
        if u32::try_from(self.max_concurrent_animations).is_err() {
            return Err(CanvasAnimError::validation(
                "max_concurrent_animations must fit in a u32 slot index",
            ));
        }
        Ok(())
    }

    /// Parse and validate options from JSON.
    pub fn from_json_str(s: &str) -> CanvasAnimResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/opts.rs"]
mod tests;
