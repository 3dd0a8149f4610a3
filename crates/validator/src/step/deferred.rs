//! Deferred validation step
//!
//! The chain is stored flat: one source future plus a queue of
//! continuations, driven in a loop on `.await`. Polling depth stays constant
//! however many operations are chained.

use std::any::Any;
use std::fmt;
use std::future::{Future, IntoFuture};
use std::marker::PhantomData;

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::error::{ErrorKind, ValidationError, ValidationResult};
use crate::fault::{self, FieldName, Site};
use crate::step::{Step, SyncStep};

/// Type-erased value passed between queued continuations.
type Erased = Box<dyn Any + Send>;

/// One queued chain operation.
type Continuation =
    Box<dyn FnOnce(FieldName, Erased) -> BoxFuture<'static, ValidationResult<Erased>> + Send>;

fn erase<T: Send + 'static>(value: T) -> Erased {
    Box::new(value)
}

fn restore<T: 'static>(value: Erased) -> T {
    match value.downcast::<T>() {
        Ok(value) => *value,
        // Each continuation is pushed together with the type change it makes.
        Err(_) => unreachable!("async step state holds a value of the wrong type"),
    }
}

/// A validation step whose state is produced by a future.
///
/// Building the chain never runs user code and never fails; every closure is
/// queued behind the previous state and only runs when the step is awaited
/// through [`validate`](Self::validate), [`error_message`](Self::error_message)
/// or `.await` directly.
///
/// There is no built-in timeout or cancellation. Wrap the pending value (for
/// instance with `tokio::time::timeout`) before handing it to
/// [`field_async`](crate::field_async) if one is needed.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldstep_validator::prelude::*;
///
/// let username = field("alice".to_owned(), "Username")
///     .min_length(3)
///     .check_async(|name| is_available(name.clone()), |f| format!("{f} is taken"));
///
/// let name = username.await?;
/// ```
#[must_use = "an async step does nothing until it is awaited"]
pub struct AsyncStep<T> {
    field: FieldName,
    source: BoxFuture<'static, ValidationResult<Erased>>,
    continuations: Vec<Continuation>,
    _value: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for AsyncStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncStep")
            .field("field", &self.field)
            .field("source", &"<pending>")
            .field("queued", &self.continuations.len())
            .finish()
    }
}

impl<T: Send + 'static> AsyncStep<T> {
    /// A step whose state is already known.
    pub(crate) fn resolved(field: FieldName, state: ValidationResult<T>) -> Self {
        Self::pending(field, future::ready(state))
    }

    /// A step whose state is produced by `future`.
    ///
    /// `future` is expected to handle its own faults.
    pub(crate) fn pending<Fut>(field: FieldName, future: Fut) -> Self
    where
        Fut: Future<Output = ValidationResult<T>> + Send + 'static,
    {
        Self {
            field,
            source: future.map(|state| state.map(erase)).boxed(),
            continuations: Vec::new(),
            _value: PhantomData,
        }
    }

    /// Name of the field under validation.
    pub fn field_name(&self) -> &str {
        &self.field
    }

    /// Queues `next` behind the current state; errors skip it.
    fn chain<R, F, Fut>(self, next: F) -> AsyncStep<R>
    where
        R: Send + 'static,
        F: FnOnce(FieldName, T) -> Fut + Send + 'static,
        Fut: Future<Output = ValidationResult<R>> + Send + 'static,
    {
        let Self {
            field,
            source,
            mut continuations,
            ..
        } = self;
        continuations.push(Box::new(move |label, value| {
            next(label, restore::<T>(value))
                .map(|state| state.map(erase))
                .boxed()
        }));
        AsyncStep {
            field,
            source,
            continuations,
            _value: PhantomData,
        }
    }

    // ------------------------------------------------------------------------
    // Async chain operations
    // ------------------------------------------------------------------------

    /// Applies an async `f` to the value; its output becomes the new state.
    ///
    /// A panic while creating or polling the returned future fails the step.
    #[track_caller]
    pub fn bind_async<R, F, Fut>(self, f: F) -> AsyncStep<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = ValidationResult<R>> + Send + 'static,
    {
        let site = Site::caller();
        self.chain(move |field, value| {
            fault::guard_future(field, ErrorKind::Bound, site, async move { f(value).await })
        })
    }

    /// Keeps the value if the async `predicate` resolves to `true`.
    #[track_caller]
    pub fn check_async<P, Fut, M>(self, predicate: P, on_false: M) -> Self
    where
        P: FnOnce(&T) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
        M: FnOnce(&str) -> String + Send + 'static,
    {
        let site = Site::caller();
        self.chain(move |field, value| async move {
            let kind = ErrorKind::Predicate;
            let verdict = fault::guard(&field, kind, site, || Ok(predicate(&value)))?;
            let holds =
                fault::guard_future(field.clone(), kind, site, async move { Ok(verdict.await) })
                    .await?;
            fault::guard(&field, kind, site, || {
                if holds {
                    Ok(value)
                } else {
                    Err(ValidationError::predicate(field.clone(), on_false(&field)))
                }
            })
        })
    }

    /// Converts the value with an async fallible function; an `Err` or a
    /// panic fails the step with the message `on_fail` builds.
    #[track_caller]
    pub fn try_map_async<R, E, F, Fut, M>(self, f: F, on_fail: M) -> AsyncStep<R>
    where
        R: Send + 'static,
        E: 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        M: FnOnce(&str) -> String + Send + 'static,
    {
        let site = Site::caller();
        self.chain(move |field, value| async move {
            match fault::attempt_future(async move { f(value).await }).await {
                Some(mapped) => Ok(mapped),
                None => fault::guard(&field, ErrorKind::Transform, site, || {
                    Err(ValidationError::transform(field.clone(), on_fail(&field)))
                }),
            }
        })
    }

    /// Runs a synchronous sub-chain on the resolved value.
    ///
    /// The sub-chain starts from a [`SyncStep`] with this step's field name;
    /// any error it ends with is attributed to that field.
    #[track_caller]
    pub fn then<R, F>(self, f: F) -> AsyncStep<R>
    where
        R: Send + 'static,
        F: FnOnce(SyncStep<T>) -> SyncStep<R> + Send + 'static,
    {
        let site = Site::caller();
        self.chain(move |field, value| {
            future::ready(fault::guard(&field, ErrorKind::Bound, site, || {
                f(SyncStep::new(field.clone(), Ok(value))).validate()
            }))
        })
    }

    // ------------------------------------------------------------------------
    // Terminal operations
    // ------------------------------------------------------------------------

    /// Resolves the step, returning the value or the error that ended it.
    pub async fn validate(self) -> ValidationResult<T> {
        let Self {
            field,
            source,
            continuations,
            ..
        } = self;
        let mut value = source.await?;
        for next in continuations {
            value = next(field.clone(), value).await?;
        }
        Ok(restore(value))
    }

    /// Resolves the step to `None` on success or the error message.
    pub async fn error_message(self) -> Option<String> {
        self.validate()
            .await
            .err()
            .map(|error| error.message.into_owned())
    }
}

impl<T: Send + 'static> Step for AsyncStep<T> {
    type Value = T;
    type Next<R: Send + 'static> = AsyncStep<R>;

    fn field_name(&self) -> &str {
        &self.field
    }

    fn bind<R, F>(self, f: F) -> AsyncStep<R>
    where
        R: Send + 'static,
        F: FnOnce(T) -> ValidationResult<R> + Send + 'static,
    {
        let site = Site::caller();
        self.chain(move |field, value| {
            future::ready(fault::guard(&field, ErrorKind::Bound, site, || f(value)))
        })
    }

    fn verify<F>(self, f: F) -> Self
    where
        F: FnOnce(&T, &str) -> Result<(), ValidationError> + Send + 'static,
    {
        let site = Site::caller();
        self.chain(move |field, value| {
            future::ready(fault::guard(&field, ErrorKind::Predicate, site, || {
                f(&value, &field)?;
                Ok(value)
            }))
        })
    }

    fn transform<R, F>(self, f: F) -> AsyncStep<R>
    where
        R: Send + 'static,
        F: FnOnce(T, &str) -> ValidationResult<R> + Send + 'static,
    {
        let site = Site::caller();
        self.chain(move |field, value| {
            future::ready(fault::guard(&field, ErrorKind::Transform, site, || {
                f(value, &field)
            }))
        })
    }

    fn into_async(self) -> Self {
        self
    }
}

impl<T: Send + 'static> From<SyncStep<T>> for AsyncStep<T> {
    fn from(step: SyncStep<T>) -> Self {
        step.to_async()
    }
}

impl<T: Send + 'static> IntoFuture for AsyncStep<T> {
    type Output = ValidationResult<T>;
    type IntoFuture = BoxFuture<'static, ValidationResult<T>>;

    fn into_future(self) -> Self::IntoFuture {
        self.validate().boxed()
    }
}

// ============================================================================
// TESTS
// ============================================================================
