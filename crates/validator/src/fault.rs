//! Conversion of foreign faults into validation errors
//!
//! User closures passed to chain operations may panic, and pending values may
//! resolve to an error or panic while being polled. Everything in this module
//! runs such code behind `catch_unwind` so that the only way a failure leaves
//! a step is as a [`ValidationError`] carrying the step's field name.
//!
//! Capturing does not silence the process panic hook: the default hook still
//! prints each caught panic to stderr (with a backtrace under
//! `RUST_BACKTRACE`). Install a custom hook with `std::panic::set_hook` to
//! change that. Under `panic = "abort"` nothing can be captured.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe, Location};

use futures::FutureExt;

use crate::error::{ErrorKind, ValidationError, ValidationResult};

/// Field label shared by a step and every error it produces.
pub(crate) type FieldName = Cow<'static, str>;

// ============================================================================
// CALL SITE
// ============================================================================

/// Source location of the chain operation that registered a closure.
///
/// Captured eagerly while the chain is built, rendered only when a fault is
/// actually converted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Site(&'static Location<'static>);

impl Site {
    #[track_caller]
    pub(crate) fn caller() -> Self {
        Self(Location::caller())
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

// ============================================================================
// FAULT CONVERSION
// ============================================================================

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked with a non-string payload".to_owned()
    }
}

/// Builds the error for a captured fault and records it.
pub(crate) fn fault(
    field: &FieldName,
    kind: ErrorKind,
    site: Site,
    message: impl Into<Cow<'static, str>>,
) -> ValidationError {
    let message = message.into();
    tracing::debug!(
        field = %field,
        kind = %kind,
        location = %site,
        message = %message,
        "captured fault in validation step"
    );
    ValidationError::new(field.clone(), message)
        .with_kind(kind)
        .with_diagnostic(site.to_string())
}

/// Runs `f` on behalf of the step labelled `field`.
///
/// A panic becomes a `kind` error with the panic message. Errors returned by
/// `f` are re-attributed to `field` and otherwise kept as they are.
pub(crate) fn guard<R>(
    field: &FieldName,
    kind: ErrorKind,
    site: Site,
    f: impl FnOnce() -> ValidationResult<R>,
) -> ValidationResult<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(error.with_field(field.clone())),
        Err(payload) => Err(fault(field, kind, site, panic_message(&*payload))),
    }
}

/// Async counterpart of [`guard`]: panics while polling `future` are caught.
pub(crate) async fn guard_future<R, Fut>(
    field: FieldName,
    kind: ErrorKind,
    site: Site,
    future: Fut,
) -> ValidationResult<R>
where
    Fut: Future<Output = ValidationResult<R>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(error.with_field(field)),
        Err(payload) => Err(fault(&field, kind, site, panic_message(&*payload))),
    }
}

/// Runs a fallible transformation, folding both `Err` and panics into `None`.
pub(crate) fn attempt<R, E>(f: impl FnOnce() -> Result<R, E>) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(_)) => None,
        Err(payload) => {
            tracing::debug!(
                message = %panic_message(&*payload),
                "transformation panicked"
            );
            None
        }
    }
}

/// Async counterpart of [`attempt`].
pub(crate) async fn attempt_future<R, E, Fut>(future: Fut) -> Option<R>
where
    Fut: Future<Output = Result<R, E>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(_)) => None,
        Err(payload) => {
            tracing::debug!(
                message = %panic_message(&*payload),
                "async transformation panicked"
            );
            None
        }
    }
}
