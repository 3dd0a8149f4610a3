//! Eagerly evaluated validation step

use std::borrow::Cow;
use std::future::Future;

use crate::error::{ErrorKind, ValidationError, ValidationResult};
use crate::fault::{self, FieldName, Site};
use crate::step::{AsyncStep, Step};

/// A validation step whose state is computed immediately.
///
/// Every operation consumes the step and returns a new one. Once the state
/// is an error, later closures are skipped and only the value type changes.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldstep_validator::FieldExt;
/// use fieldstep_validator::prelude::*;
///
/// let result = "".field("Email")
///     .check(|v| !v.is_empty(), |f| format!("{f} is empty"))
///     .validate();
///
/// assert_eq!(result.unwrap_err().message(), "Email is empty");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a step does nothing until `validate` or `error_message` reads it"]
pub struct SyncStep<T> {
    field: FieldName,
    state: ValidationResult<T>,
}

impl<T> SyncStep<T> {
    pub(crate) fn new(field: FieldName, state: ValidationResult<T>) -> Self {
        Self { field, state }
    }

    /// Name of the field under validation.
    pub fn field_name(&self) -> &str {
        &self.field
    }

    /// Returns `true` while no operation has failed.
    pub fn is_valid(&self) -> bool {
        self.state.is_ok()
    }

    /// Returns `true` once an operation has failed.
    pub fn is_invalid(&self) -> bool {
        self.state.is_err()
    }

    /// The current value, if the step is valid.
    pub fn value(&self) -> Option<&T> {
        self.state.as_ref().ok()
    }

    /// The error that ended the chain, if any.
    pub fn error(&self) -> Option<&ValidationError> {
        self.state.as_ref().err()
    }

    /// Runs `f` on the value under a panic guard attributed to `kind`.
    fn apply<R, F>(self, kind: ErrorKind, site: Site, f: F) -> SyncStep<R>
    where
        F: FnOnce(T, &str) -> ValidationResult<R>,
    {
        let Self { field, state } = self;
        let state = match state {
            Ok(value) => fault::guard(&field, kind, site, || f(value, field.as_ref())),
            Err(error) => Err(error),
        };
        SyncStep { field, state }
    }

    // ------------------------------------------------------------------------
    // Chain operations
    // ------------------------------------------------------------------------

    /// Applies `f` to the value; its result becomes the new state.
    #[track_caller]
    pub fn bind<R, F>(self, f: F) -> SyncStep<R>
    where
        F: FnOnce(T) -> ValidationResult<R>,
    {
        self.apply(ErrorKind::Bound, Site::caller(), |value, _| f(value))
    }

    /// Keeps the value if `predicate` holds, otherwise fails with the message
    /// `on_false` builds from the field name.
    #[track_caller]
    pub fn check<P, M>(self, predicate: P, on_false: M) -> Self
    where
        P: FnOnce(&T) -> bool,
        M: FnOnce(&str) -> String,
    {
        self.apply(ErrorKind::Predicate, Site::caller(), |value, field| {
            if predicate(&value) {
                Ok(value)
            } else {
                Err(ValidationError::predicate(field.to_owned(), on_false(field)))
            }
        })
    }

    /// Converts the value with a fallible function; an `Err` or a panic in
    /// `f` fails the step with the message `on_fail` builds.
    #[track_caller]
    pub fn try_map<R, E, F, M>(self, f: F, on_fail: M) -> SyncStep<R>
    where
        F: FnOnce(T) -> Result<R, E>,
        M: FnOnce(&str) -> String,
    {
        self.apply(ErrorKind::Transform, Site::caller(), |value, field| {
            match fault::attempt(|| f(value)) {
                Some(mapped) => Ok(mapped),
                None => Err(ValidationError::transform(field.to_owned(), on_fail(field))),
            }
        })
    }

    /// Converts the value with a total function.
    #[track_caller]
    pub fn map<R, F>(self, f: F) -> SyncStep<R>
    where
        F: FnOnce(T) -> R,
    {
        self.apply(ErrorKind::Transform, Site::caller(), |value, _| Ok(f(value)))
    }

    // ------------------------------------------------------------------------
    // Terminal operations
    // ------------------------------------------------------------------------

    /// Consumes the step, returning the value or the error that ended it.
    ///
    /// Use `?` to propagate the error or match on the result to inspect it.
    pub fn validate(self) -> ValidationResult<T> {
        self.state
    }

    /// `None` if the step is valid, otherwise the error message.
    ///
    /// Shaped for form field callbacks that expect an optional message.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(|error| error.message().to_owned())
    }

    /// Splits the step into its field name and state.
    pub fn into_parts(self) -> (Cow<'static, str>, ValidationResult<T>) {
        (self.field, self.state)
    }
}

// ============================================================================
// UPGRADE TO ASYNC
// ============================================================================

impl<T: Send + 'static> SyncStep<T> {
    /// Lifts the step into an already-resolved [`AsyncStep`].
    pub fn to_async(self) -> AsyncStep<T> {
        AsyncStep::resolved(self.field, self.state)
    }

    /// Continues the chain with an async `bind`.
    #[track_caller]
    pub fn bind_async<R, F, Fut>(self, f: F) -> AsyncStep<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = ValidationResult<R>> + Send + 'static,
    {
        self.to_async().bind_async(f)
    }

    /// Continues the chain with an async predicate.
    #[track_caller]
    pub fn check_async<P, Fut, M>(self, predicate: P, on_false: M) -> AsyncStep<T>
    where
        P: FnOnce(&T) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
        M: FnOnce(&str) -> String + Send + 'static,
    {
        self.to_async().check_async(predicate, on_false)
    }

    /// Continues the chain with an async fallible conversion.
    #[track_caller]
    pub fn try_map_async<R, E, F, Fut, M>(self, f: F, on_fail: M) -> AsyncStep<R>
    where
        R: Send + 'static,
        E: 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        M: FnOnce(&str) -> String + Send + 'static,
    {
        self.to_async().try_map_async(f, on_fail)
    }
}

impl<T: Send + 'static> Step for SyncStep<T> {
    type Value = T;
    type Next<R: Send + 'static> = SyncStep<R>;

    fn field_name(&self) -> &str {
        &self.field
    }

    fn bind<R, F>(self, f: F) -> SyncStep<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> ValidationResult<R> + Send + 'static,
    {
        SyncStep::bind(self, f)
    }

    fn verify<F>(self, f: F) -> Self
    where
        F: FnOnce(&T, &str) -> Result<(), ValidationError> + Send + 'static,
    {
        self.apply(ErrorKind::Predicate, Site::caller(), |value, field| {
            f(&value, field)?;
            Ok(value)
        })
    }

    fn transform<R, F>(self, f: F) -> SyncStep<R>
    where
        R: Send + 'static,
        F: FnOnce(T, &str) -> ValidationResult<R> + Send + 'static,
    {
        self.apply(ErrorKind::Transform, Site::caller(), f)
    }

    fn into_async(self) -> AsyncStep<T> {
        self.to_async()
    }
}

// ============================================================================
// TESTS
// ============================================================================
