//! Batch combinator
//!
//! Combines many independent field steps into one all-or-first-failure
//! result. Every step runs to completion; when more than one fails, the error
//! reported is the one from the earliest step *in input order*, never the
//! first to finish.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldstep_validator::FieldExt;
//! use fieldstep_validator::prelude::*;
//!
//! // Homogeneous steps
//! let names = validate_all([
//!     field("ada", "First").not_empty(),
//!     field("lovelace", "Last").not_empty(),
//! ])?;
//!
//! // Mixed sync and async, lifted with `.into()`
//! let codes = validate_all_async([
//!     field("A1".to_owned(), "Local").into(),
//!     field_async(fetch_code(), "Remote"),
//! ])
//! .await?;
//!
//! // Heterogeneous value types
//! let (email, age) = (field("a@b.io", "Email").email(), "30".field("Age").parse::<u8>())
//!     .validate_all()?;
//! ```

use std::future::Future;

use futures::future;
use futures::stream::{self, StreamExt};

use crate::config::BatchOptions;
use crate::error::ValidationResult;
use crate::step::{AsyncStep, SyncStep};

// ============================================================================
// HOMOGENEOUS BATCHES
// ============================================================================

/// Validates a batch of synchronous steps.
///
/// Returns the values in input order, or the error of the first failing
/// step.
pub fn validate_all<T, I>(steps: I) -> ValidationResult<Vec<T>>
where
    I: IntoIterator<Item = SyncStep<T>>,
{
    let results: Vec<_> = steps.into_iter().map(SyncStep::validate).collect();
    first_failure(results)
}

/// Validates a batch of asynchronous steps concurrently.
///
/// Synchronous steps join the batch through `.into()`. All steps are driven
/// to completion before the results are scanned, so a failure never cancels
/// the steps still in flight.
pub async fn validate_all_async<T, S, I>(steps: I) -> ValidationResult<Vec<T>>
where
    T: Send + 'static,
    S: Into<AsyncStep<T>>,
    I: IntoIterator<Item = S>,
{
    validate_all_async_with(steps, BatchOptions::default()).await
}

/// [`validate_all_async`] with explicit [`BatchOptions`].
///
/// With a concurrency limit, at most that many steps are polled at the same
/// time; results still come back in input order.
pub async fn validate_all_async_with<T, S, I>(
    steps: I,
    options: BatchOptions,
) -> ValidationResult<Vec<T>>
where
    T: Send + 'static,
    S: Into<AsyncStep<T>>,
    I: IntoIterator<Item = S>,
{
    let pending = steps.into_iter().map(|step| {
        let step: AsyncStep<T> = step.into();
        step.validate()
    });
    let results: Vec<ValidationResult<T>> = match options.concurrency {
        None => future::join_all(pending).await,
        Some(limit) => stream::iter(pending).buffered(limit.get()).collect().await,
    };
    first_failure(results)
}

/// Scans completed results in input order.
fn first_failure<T>(results: Vec<ValidationResult<T>>) -> ValidationResult<Vec<T>> {
    let steps = results.len();
    let mut values = Vec::with_capacity(steps);
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(value) => values.push(value),
            Err(error) => {
                tracing::trace!(
                    steps,
                    failed_at = index,
                    field = %error.field,
                    "batch validation failed"
                );
                return Err(error);
            }
        }
    }
    tracing::trace!(steps, "batch validation passed");
    Ok(values)
}

// ============================================================================
// HETEROGENEOUS BATCHES
// ============================================================================

/// A tuple of synchronous steps with possibly different value types.
pub trait StepTuple {
    /// Tuple of the validated values.
    type Output;

    /// Returns every value, or the first error in tuple order.
    fn validate_all(self) -> ValidationResult<Self::Output>;
}

/// A tuple of asynchronous steps with possibly different value types.
pub trait AsyncStepTuple {
    /// Tuple of the validated values.
    type Output;

    /// Drives every step concurrently, then returns every value or the first
    /// error in tuple order.
    fn validate_all_async(self) -> impl Future<Output = ValidationResult<Self::Output>> + Send;
}

macro_rules! impl_step_tuples {
    ($($step:ident: $ty:ident),+) => {
        impl<$($ty),+> StepTuple for ($(SyncStep<$ty>,)+) {
            type Output = ($($ty,)+);

            fn validate_all(self) -> ValidationResult<Self::Output> {
                let ($($step,)+) = self;
                Ok(($($step.validate()?,)+))
            }
        }

        impl<$($ty: Send + 'static),+> AsyncStepTuple for ($(AsyncStep<$ty>,)+) {
            type Output = ($($ty,)+);

            fn validate_all_async(
                self,
            ) -> impl Future<Output = ValidationResult<Self::Output>> + Send {
                let ($($step,)+) = self;
                async move {
                    let ($($step,)+) = futures::join!($($step.validate()),+);
                    Ok(($($step?,)+))
                }
            }
        }
    };
}

impl_step_tuples!(a: A);
impl_step_tuples!(a: A, b: B);
impl_step_tuples!(a: A, b: B, c: C);
impl_step_tuples!(a: A, b: B, c: C, d: D);
impl_step_tuples!(a: A, b: B, c: C, d: D, e: E);
impl_step_tuples!(a: A, b: B, c: C, d: D, e: E, f: F);
impl_step_tuples!(a: A, b: B, c: C, d: D, e: E, f: F, g: G);
impl_step_tuples!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H);

// ============================================================================
// TESTS
// ============================================================================
