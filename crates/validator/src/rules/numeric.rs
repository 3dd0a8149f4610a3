//! Ordering rules for numbers and any other `PartialOrd + Display + Copy` value

use std::fmt::Display;

use crate::rule;
use crate::step::Step;

rule! {
    #[derive(Copy, PartialEq)]
    pub Min<T: PartialOrd + Display + Copy> { min: T } for T;
    holds(self, input) { *input >= self.min }
    message(self, field, input) { format!("{field} must be at least {}", self.min) }
    code("min");
    fn min(min: T);
}

rule! {
    #[derive(Copy, PartialEq)]
    pub Max<T: PartialOrd + Display + Copy> { max: T } for T;
    holds(self, input) { *input <= self.max }
    message(self, field, input) { format!("{field} must be at most {}", self.max) }
    code("max");
    fn max(max: T);
}

rule! {
    #[derive(Copy, PartialEq)]
    pub InRange<T: PartialOrd + Display + Copy> { min: T, max: T } for T;
    holds(self, input) { *input >= self.min && *input <= self.max }
    message(self, field, input) {
        format!("{field} must be between {} and {}", self.min, self.max)
    }
    code("in_range");
    fn in_range(min: T, max: T);
}

/// Ordering rules for steps over comparable, printable values.
pub trait NumericRules: Step<Value: PartialOrd + Display + Copy> {
    /// Fails when the value is below `bound`.
    #[track_caller]
    fn min(self, bound: Self::Value) -> Self {
        self.rule(Min::new(bound))
    }

    /// Fails when the value is above `bound`.
    #[track_caller]
    fn max(self, bound: Self::Value) -> Self {
        self.rule(Max::new(bound))
    }

    /// Fails unless the value lies in `min..=max`.
    #[track_caller]
    fn in_range(self, min: Self::Value, max: Self::Value) -> Self {
        self.rule(InRange::new(min, max))
    }
}

impl<S> NumericRules for S where S: Step<Value: PartialOrd + Display + Copy> {}
