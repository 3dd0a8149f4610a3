//! Validation steps
//!
//! A step is a single field's validation in progress: it carries the field
//! name and a state that is either the validated value or the error that
//! ended the chain. Two forms exist:
//!
//! - [`SyncStep`] computes every operation eagerly.
//! - [`AsyncStep`] defers its state to a boxed future that resolves when the
//!   step is awaited.
//!
//! Both forms implement [`Step`], which is what rules and batch helpers are
//! written against.
//!
//! # Panics in closures
//!
//! A panic inside any closure or future handed to a step is caught and turned
//! into an error for the step's field. The panic hook still runs first, so
//! the default hook prints the panic message to stderr even though the chain
//! carries on normally.
//!
//! # Short-circuiting
//!
//! Once a step holds an error, no closure registered afterwards is invoked.
//! The error travels to the terminal operation untouched while the value
//! type keeps changing with each operation:
//!
//! ```rust,ignore
//! use fieldstep_validator::FieldExt;
//! use fieldstep_validator::prelude::*;
//!
//! let age = "abc"
//!     .field("Age")
//!     .parse::<u32>()  // fails here
//!     .min(18)         // never evaluated
//!     .validate();
//! assert_eq!(age.unwrap_err().field_name(), "Age");
//! ```

mod deferred;
mod sync;

pub use deferred::AsyncStep;
pub use sync::SyncStep;

use std::borrow::Borrow;

use crate::error::{ValidationError, ValidationResult};
use crate::fault;
use crate::rule::Rule;

// ============================================================================
// STEP TRAIT
// ============================================================================

/// Chain operations shared by [`SyncStep`] and [`AsyncStep`].
///
/// Implementors provide four primitives (`bind`, `verify`, `transform` and
/// `into_async`); everything else is derived from them. Every closure runs
/// behind a panic guard, so a panicking closure turns the step into an error
/// instead of unwinding through the caller.
///
/// `Next<R>` is the same step form re-parameterized to a new value type, so
/// a synchronous chain stays synchronous across type-changing operations.
pub trait Step: Sized {
    /// Type of the value held while the step is valid.
    type Value: Send + 'static;

    /// This step form holding a value of type `R`.
    type Next<R: Send + 'static>: Step<Value = R>;

    /// Name of the field under validation.
    fn field_name(&self) -> &str;

    /// Applies `f` to the value, letting its result become the new state.
    ///
    /// Errors returned by `f` are attributed to this step's field.
    #[track_caller]
    fn bind<R, F>(self, f: F) -> Self::Next<R>
    where
        R: Send + 'static,
        F: FnOnce(Self::Value) -> ValidationResult<R> + Send + 'static;

    /// Type-preserving check with access to the value and the field name.
    ///
    /// This is the primitive behind [`check`](Self::check) and
    /// [`rule`](Self::rule); a panic is reported as a predicate failure.
    #[track_caller]
    fn verify<F>(self, f: F) -> Self
    where
        F: FnOnce(&Self::Value, &str) -> Result<(), ValidationError> + Send + 'static;

    /// Type-changing conversion with access to the field name.
    ///
    /// This is the primitive behind [`try_map`](Self::try_map) and
    /// [`map`](Self::map); a panic is reported as a transformation failure.
    #[track_caller]
    fn transform<R, F>(self, f: F) -> Self::Next<R>
    where
        R: Send + 'static,
        F: FnOnce(Self::Value, &str) -> ValidationResult<R> + Send + 'static;

    /// Converts the step into its deferred form.
    fn into_async(self) -> AsyncStep<Self::Value>;

    /// Keeps the value if `predicate` holds, otherwise fails with the message
    /// produced by `on_false` from the field name.
    #[track_caller]
    fn check<P, M>(self, predicate: P, on_false: M) -> Self
    where
        P: FnOnce(&Self::Value) -> bool + Send + 'static,
        M: FnOnce(&str) -> String + Send + 'static,
    {
        self.verify(move |value, field| {
            if predicate(value) {
                Ok(())
            } else {
                Err(ValidationError::predicate(field.to_owned(), on_false(field)))
            }
        })
    }

    /// Applies a [`Rule`] to the value.
    #[track_caller]
    fn rule<R>(self, rule: R) -> Self
    where
        R: Rule + Send + 'static,
        Self::Value: Borrow<R::Input>,
    {
        self.verify(move |value, field| {
            let input: &R::Input = value.borrow();
            if rule.holds(input) {
                Ok(())
            } else {
                Err(rule.violation(field, input))
            }
        })
    }

    /// Converts the value with a fallible function.
    ///
    /// Both an `Err` from `f` and a panic inside it are reported with the
    /// message produced by `on_fail` from the field name.
    #[track_caller]
    fn try_map<R, E, F, M>(self, f: F, on_fail: M) -> Self::Next<R>
    where
        R: Send + 'static,
        F: FnOnce(Self::Value) -> Result<R, E> + Send + 'static,
        M: FnOnce(&str) -> String + Send + 'static,
    {
        self.transform(move |value, field| match fault::attempt(|| f(value)) {
            Some(mapped) => Ok(mapped),
            None => Err(ValidationError::transform(field.to_owned(), on_fail(field))),
        })
    }

    /// Converts the value with a total function.
    #[track_caller]
    fn map<R, F>(self, f: F) -> Self::Next<R>
    where
        R: Send + 'static,
        F: FnOnce(Self::Value) -> R + Send + 'static,
    {
        self.transform(move |value, _| Ok(f(value)))
    }
}
