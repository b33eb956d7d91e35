use tracing::{debug, warn};

use crate::{BridgeError, Result};

/// Failure reported by host adapter code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The host does not implement this operation
    #[error("operation not implemented by the host")]
    Unimplemented,

    /// The host tried and failed
    #[error("{0}")]
    Failed(String),
}

impl AdapterError {
    /// Convenience constructor for host failures.
    pub fn failed(reason: impl Into<String>) -> Self {
        AdapterError::Failed(reason.into())
    }
}

/// Result type every adapter method returns.
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Applies the bridge's fallback policy to adapter results.
///
/// An unimplemented operation is never an error: getters fall back to their
/// documented default and mutators become no-ops. Host failures are logged and
/// surface as `BridgeError::Adapter`.
pub(crate) trait AdapterResultExt<T> {
    /// Substitutes `fallback` when the host left the operation unimplemented.
    fn or_fallback(self, operation: &'static str, fallback: T) -> Result<T>;

    /// Like `or_fallback`, computing the fallback lazily.
    fn or_fallback_with(self, operation: &'static str, fallback: impl FnOnce() -> T)
    -> Result<T>;

    /// `None` when the host left the operation unimplemented.
    fn implemented(self, operation: &'static str) -> Result<Option<T>>;
}

impl<T> AdapterResultExt<T> for AdapterResult<T> {
    fn or_fallback(self, operation: &'static str, fallback: T) -> Result<T> {
        self.or_fallback_with(operation, || fallback)
    }

    fn or_fallback_with(
        self,
        operation: &'static str,
        fallback: impl FnOnce() -> T,
    ) -> Result<T> {
        Ok(self.implemented(operation)?.unwrap_or_else(fallback))
    }

    fn implemented(self, operation: &'static str) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(AdapterError::Unimplemented) => {
                debug!(operation, "Adapter does not implement operation, using default");
                Ok(None)
            }
            Err(source) => {
                warn!(operation, error = %source, "Adapter call failed");
                Err(BridgeError::Adapter { operation, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unimplemented_uses_fallback() {
        let result: AdapterResult<bool> = Err(AdapterError::Unimplemented);

        assert!(!result.or_fallback("can_seek", false).unwrap());
    }

    #[test]
    fn failure_is_reported_with_operation() {
        let result: AdapterResult<bool> = Err(AdapterError::failed("device unplugged"));

        match result.or_fallback("can_seek", false) {
            Err(BridgeError::Adapter { operation, source }) => {
                assert_eq!(operation, "can_seek");
                assert_eq!(source, AdapterError::failed("device unplugged"));
            }
            other => panic!("expected adapter error, got {other:?}"),
        }
    }

    #[test]
    fn implemented_distinguishes_noop_from_success() {
        let done: AdapterResult<()> = Ok(());
        let skipped: AdapterResult<()> = Err(AdapterError::Unimplemented);

        assert!(done.implemented("next").unwrap().is_some());
        assert!(skipped.implemented("next").unwrap().is_none());
    }
}
