//! Field entry points
//!
//! Every chain starts here: a value (or a pending value) is paired with the
//! human-readable name of the field it came from, producing a step in the
//! valid state. Pending values are the one place where foreign failures
//! enter the validation error taxonomy, so their faults are converted here.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldstep_validator::FieldExt;
//! use fieldstep_validator::prelude::*;
//!
//! // Immediate value
//! let email = field("a@b.io", "Email").email().validate()?;
//!
//! // Extension-method form
//! let age = "42".field("Age").parse::<u8>().validate()?;
//!
//! // Pending value: a failed lookup becomes a validation error for "Owner"
//! let owner = field_async(load_owner(id), "Owner").validate().await?;
//! ```

use std::borrow::Cow;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::error::{ErrorKind, ValidationError, ValidationResult};
use crate::fault::{self, FieldName, Site};
use crate::step::{AsyncStep, SyncStep};

// ============================================================================
// IMMEDIATE VALUES
// ============================================================================

/// Starts a synchronous chain for `value` under the label `name`.
pub fn field<T>(value: T, name: impl Into<Cow<'static, str>>) -> SyncStep<T> {
    SyncStep::new(name.into(), Ok(value))
}

/// Lifts an already partitioned result into a synchronous step.
///
/// Nothing is re-run. An error is re-attributed to `name` so the field under
/// validation is always the one reported, and is tagged
/// [`ErrorKind::Propagated`].
pub fn from_result<T>(
    result: ValidationResult<T>,
    name: impl Into<Cow<'static, str>>,
) -> SyncStep<T> {
    let name: FieldName = name.into();
    let state = result.map_err(|error| adopt(error, &name));
    SyncStep::new(name, state)
}

// ============================================================================
// PENDING VALUES
// ============================================================================

/// Starts an asynchronous chain for a pending fallible value.
///
/// When `pending` resolves to `Err(e)` the step fails with `e.to_string()` as
/// its message; a panic while polling `pending` is captured the same way.
/// Both carry [`ErrorKind::FieldInit`] and the call site as diagnostic.
#[track_caller]
pub fn field_async<T, E, Fut>(pending: Fut, name: impl Into<Cow<'static, str>>) -> AsyncStep<T>
where
    T: Send + 'static,
    E: Display,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let site = Site::caller();
    let name: FieldName = name.into();
    let label = name.clone();
    AsyncStep::pending(name, async move {
        match AssertUnwindSafe(pending).catch_unwind().await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(fault::fault(
                &label,
                ErrorKind::FieldInit,
                site,
                error.to_string(),
            )),
            Err(payload) => Err(fault::fault(
                &label,
                ErrorKind::FieldInit,
                site,
                fault::panic_message(&*payload),
            )),
        }
    })
}

/// Starts an asynchronous chain for a pending value that cannot fail by
/// itself. Only a panic while polling is converted into an error.
#[track_caller]
pub fn field_future<T, Fut>(pending: Fut, name: impl Into<Cow<'static, str>>) -> AsyncStep<T>
where
    T: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let site = Site::caller();
    let name: FieldName = name.into();
    let label = name.clone();
    AsyncStep::pending(
        name,
        fault::guard_future(label, ErrorKind::FieldInit, site, pending.map(Ok)),
    )
}

/// Lifts a pending, already partitioned result into an asynchronous step.
///
/// An error is re-attributed to `name` and tagged
/// [`ErrorKind::Propagated`]; a panic while polling is a field
/// initialization failure.
#[track_caller]
pub fn from_async_result<T, Fut>(pending: Fut, name: impl Into<Cow<'static, str>>) -> AsyncStep<T>
where
    T: Send + 'static,
    Fut: Future<Output = ValidationResult<T>> + Send + 'static,
{
    let site = Site::caller();
    let name: FieldName = name.into();
    let label = name.clone();
    let adopted =
        pending.map(|result| result.map_err(|error| error.with_kind(ErrorKind::Propagated)));
    AsyncStep::pending(
        name,
        fault::guard_future(label, ErrorKind::FieldInit, site, adopted),
    )
}

fn adopt(error: ValidationError, name: &FieldName) -> ValidationError {
    error.with_field(name.clone()).with_kind(ErrorKind::Propagated)
}

// ============================================================================
// EXTENSION TRAITS
// ============================================================================

/// Method form of [`field`] available on every value.
///
/// Not part of the prelude. With this trait in scope, a by-reference `field`
/// method on another type (e.g. `DebugStruct::field`) resolves to this one
/// instead, so import it only where the method form is wanted.
///
/// ```rust,ignore
/// use fieldstep_validator::FieldExt;
/// use fieldstep_validator::prelude::*;
///
/// let name = "alice".field("Username").min_length(3).validate()?;
/// ```
pub trait FieldExt: Sized {
    /// Starts a synchronous chain for `self` labelled `name`.
    fn field(self, name: impl Into<Cow<'static, str>>) -> SyncStep<Self> {
        field(self, name)
    }
}

impl<T> FieldExt for T {}

/// Method form of [`field_async`] for fallible futures.
pub trait PendingFieldExt<T, E>: Future<Output = Result<T, E>> + Sized {
    /// Starts an asynchronous chain for this pending value labelled `name`.
    #[track_caller]
    fn field_async(self, name: impl Into<Cow<'static, str>>) -> AsyncStep<T>;
}

impl<T, E, Fut> PendingFieldExt<T, E> for Fut
where
    T: Send + 'static,
    E: Display,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    fn field_async(self, name: impl Into<Cow<'static, str>>) -> AsyncStep<T> {
        field_async(self, name)
    }
}

// ============================================================================
// TESTS
// ============================================================================
