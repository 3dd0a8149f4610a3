//! Batch configuration

use std::num::NonZeroUsize;

/// Options for [`validate_all_async_with`](crate::validate_all_async_with).
///
/// The default runs every step concurrently with no limit.
///
/// ```rust,ignore
/// use std::num::NonZeroUsize;
/// use fieldstep_validator::BatchOptions;
///
/// let options = BatchOptions::default().with_concurrency(NonZeroUsize::new(4).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchOptions {
    /// Upper bound on steps polled at the same time. `None` means unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub concurrency: Option<NonZeroUsize>,
}

impl BatchOptions {
    /// Unbounded concurrency.
    #[must_use]
    pub const fn new() -> Self {
        Self { concurrency: None }
    }

    /// Limits how many steps are polled at the same time.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_concurrency(mut self, limit: NonZeroUsize) -> Self {
        self.concurrency = Some(limit);
        self
    }

    /// Removes the concurrency limit.
    #[must_use = "builder methods must be chained or built"]
    pub const fn unbounded(mut self) -> Self {
        self.concurrency = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(BatchOptions::default(), BatchOptions::new());
        assert!(BatchOptions::default().concurrency.is_none());
    }

    #[test]
    fn test_with_concurrency() {
        let limit = NonZeroUsize::new(3).unwrap();
        let options = BatchOptions::new().with_concurrency(limit);
        assert_eq!(options.concurrency, Some(limit));
        assert!(options.unbounded().concurrency.is_none());
    }
}
