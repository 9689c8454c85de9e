//! Privileged-execution bridge.
//!
//! The host owns privilege elevation. This crate only relies on its contract:
//! run a zero-argument operation with elevated rights and hand back its
//! result, or its failure, untouched. [`PrivilegedExecutor`] is the
//! object-safe seam; callers use [`PrivilegedExecutorExt::call_privileged`]
//! for a typed result.

use crate::error::{ExtensionError, Result};
use std::any::Any;

/// Type-erased value produced by a privileged operation.
pub type ErasedOutput = Box<dyn Any + Send>;

/// A zero-argument operation handed to the bridge.
pub type PrivilegedOperation<'a> = Box<dyn FnOnce() -> Result<ErasedOutput> + Send + 'a>;

pub trait PrivilegedExecutor: Send + Sync + 'static {
    /// Run `operation` with elevated rights.
    ///
    /// Implementations must return the operation's outcome unchanged. They
    /// may fail on their own with [`ExtensionError::PrivilegedExecution`].
    fn execute(&self, operation: PrivilegedOperation<'_>) -> Result<ErasedOutput>;
}

pub trait PrivilegedExecutorExt {
    fn call_privileged<'a, T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'a;
}

impl<E: PrivilegedExecutor + ?Sized> PrivilegedExecutorExt for E {
    fn call_privileged<'a, T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'a,
    {
        let erased: PrivilegedOperation<'a> =
            Box::new(move || operation().map(|value| Box::new(value) as ErasedOutput));

        let output = self.execute(erased)?;
        output
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ExtensionError::DowncastFailed {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }
}

/// Runs operations in place.
///
/// Used when the crate is hosted standalone and the process already holds
/// every right the operations need.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectExecutor;

impl PrivilegedExecutor for DirectExecutor {
    fn execute(&self, operation: PrivilegedOperation<'_>) -> Result<ErasedOutput> {
        let span = tracing::debug_span!("privileged");
        let _entered = span.enter();
        let outcome = operation();
        if let Err(e) = &outcome {
            tracing::debug!(error = %e, "privileged operation failed");
        }
        outcome
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingExecutor;
    use super::*;
    use std::sync::Arc;

    /// Refuses to elevate.
    struct Denying;

    impl PrivilegedExecutor for Denying {
        fn execute(&self, _operation: PrivilegedOperation<'_>) -> Result<ErasedOutput> {
            Err(ExtensionError::PrivilegedExecution("elevation refused".into()))
        }
    }

    /// Hands back a value of the wrong type.
    struct Substituting;

    impl PrivilegedExecutor for Substituting {
        fn execute(&self, _operation: PrivilegedOperation<'_>) -> Result<ErasedOutput> {
            Ok(Box::new(7_u8))
        }
    }

    #[test]
    fn returns_the_operation_result_verbatim() {
        let value = DirectExecutor
            .call_privileged(|| Ok("Hello from extension-name!".to_string()))
            .unwrap();
        assert_eq!(value, "Hello from extension-name!");
    }

    #[test]
    fn propagates_the_operation_failure_unchanged() {
        let err = DirectExecutor
            .call_privileged(|| -> Result<String> { Err(ExtensionError::PrivilegedExecution("boom".into())) })
            .unwrap_err();
        assert!(matches!(err, ExtensionError::PrivilegedExecution(ref msg) if msg == "boom"));
    }

    #[test]
    fn operation_may_borrow_from_the_caller() {
        let greeting = String::from("borrowed");
        let executor: Arc<dyn PrivilegedExecutor> = Arc::new(DirectExecutor);
        let len = executor.call_privileged(|| Ok(greeting.len())).unwrap();
        assert_eq!(len, 8);
    }

    #[test]
    fn executor_failure_skips_the_operation() {
        let mut ran = false;
        let err = Denying
            .call_privileged(|| {
                ran = true;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ExtensionError::PrivilegedExecution(_)));
        assert!(!ran);
    }

    #[test]
    fn mismatched_output_type_is_a_downcast_error() {
        let err = Substituting.call_privileged(|| Ok(String::new())).unwrap_err();
        assert!(matches!(err, ExtensionError::DowncastFailed { .. }));
    }

    #[test]
    fn counting_executor_counts_each_call() {
        let executor = CountingExecutor::default();
        assert_eq!(executor.calls(), 0);
        executor.call_privileged(|| Ok(1)).unwrap();
        executor
            .call_privileged(|| -> Result<i32> { Err(ExtensionError::PrivilegedExecution("x".into())) })
            .unwrap_err();
        assert_eq!(executor.calls(), 2);
    }
}
