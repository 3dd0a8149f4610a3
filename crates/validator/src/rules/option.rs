//! Presence rule for optional values

use crate::error::ValidationError;
use crate::step::Step;

/// Rules for steps over `Option<T>`.
pub trait OptionRules<T: Send + 'static>: Step<Value = Option<T>> {
    /// Unwraps the value, failing with code `required` when it is `None`.
    #[track_caller]
    fn required(self) -> Self::Next<T> {
        self.transform(|value, field| {
            value.ok_or_else(|| {
                ValidationError::predicate(field.to_owned(), format!("{field} is required"))
                    .with_code("required")
            })
        })
    }
}

impl<T, S> OptionRules<T> for S
where
    T: Send + 'static,
    S: Step<Value = Option<T>>,
{
}
