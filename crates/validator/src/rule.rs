//! Reusable validation rules
//!
//! A [`Rule`] is a named, reusable predicate over a borrowed input together
//! with the error it reports. Rules are applied to a chain with
//! [`Step::rule`](crate::Step::rule) and behave exactly like
//! [`check`](crate::Step::check): a panic is captured, an earlier error skips
//! the rule, and a violation is reported as a predicate failure for the
//! step's field.
//!
//! The [`rule!`](crate::rule!) macro generates the struct, the `Rule` impl, a
//! constructor and a factory function in one declaration.

use crate::error::ValidationError;

/// A reusable predicate with its own failure report.
pub trait Rule {
    /// Borrowed form of the value the rule inspects, e.g. `str` or `u32`.
    type Input: ?Sized;

    /// Returns `true` when `input` satisfies the rule.
    fn holds(&self, input: &Self::Input) -> bool;

    /// Builds the error reported for `field` when [`holds`](Self::holds)
    /// returned `false`.
    fn violation(&self, field: &str, input: &Self::Input) -> ValidationError;
}

/// Declares a [`Rule`]: struct definition, `Rule` implementation, constructor
/// and an optional factory function.
///
/// Unit rules always derive `Debug, Clone, Copy, PartialEq, Eq, Hash`; every
/// other variant derives `Debug, Clone` only. Extra derives for those go in
/// a leading `#[derive(...)]`. The reported error is a predicate failure for
/// the step's field carrying the given `code`.
///
/// # Variants
///
/// **Unit rule**:
/// ```rust,ignore
/// rule! {
///     pub NotEmpty for str;
///     holds(input) { !input.is_empty() }
///     message(field, input) { format!("{field} must not be empty") }
///     code("not_empty");
///     fn not_empty();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// rule! {
///     #[derive(Copy, PartialEq, Eq, Hash)]
///     pub MinLength { min: usize } for str;
///     holds(self, input) { input.chars().count() >= self.min }
///     message(self, field, input) { format!("{field} must be at least {} characters", self.min) }
///     code("min_length");
///     fn min_length(min: usize);
/// }
/// ```
///
/// **Custom constructor**:
/// ```rust,ignore
/// rule! {
///     pub LengthBetween { min: usize, max: usize } for str;
///     holds(self, input) { (self.min..=self.max).contains(&input.chars().count()) }
///     message(self, field, input) { format!("{field} is out of range") }
///     code("length_between");
///     new(min: usize, max: usize) { Self { min: min.min(max), max: max.max(min) } }
///     fn length_between(min: usize, max: usize);
/// }
/// ```
///
/// **Generic rule**:
/// ```rust,ignore
/// rule! {
///     #[derive(Copy, PartialEq)]
///     pub Min<T: PartialOrd + Display + Copy> { min: T } for T;
///     holds(self, input) { *input >= self.min }
///     message(self, field, input) { format!("{field} must be at least {}", self.min) }
///     code("min");
///     fn min(min: T);
/// }
/// ```
#[macro_export]
macro_rules! rule {
    // ── Unit rule + factory fn ──────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        holds($inp:ident) $holds:block
        message($fld:ident, $minp:ident) $message:block
        code($code:literal);
        fn $factory:ident();
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name for $input;
            holds($inp) $holds
            message($fld, $minp) $message
            code($code);
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Unit rule ───────────────────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        holds($inp:ident) $holds:block
        message($fld:ident, $minp:ident) $message:block
        code($code:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Rule for $name {
            type Input = $input;

            fn holds(&self, $inp: &Self::Input) -> bool $holds

            #[allow(unused_variables)]
            fn violation(&self, $fld: &str, $minp: &Self::Input) -> $crate::ValidationError {
                $crate::ValidationError::predicate($fld.to_owned(), $message).with_code($code)
            }
        }
    };

    // ── Struct with fields + custom new + factory fn ────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        holds($self_:ident, $inp:ident) $holds:block
        message($self2:ident, $fld:ident, $minp:ident) $message:block
        code($code:literal);
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        $crate::rule!(@impl $name for $input;
            holds($self_, $inp) $holds
            message($self2, $fld, $minp) $message
            code($code);
        );

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Struct with fields + auto new + factory fn ──────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        holds($self_:ident, $inp:ident) $holds:block
        message($self2:ident, $fld:ident, $minp:ident) $message:block
        code($code:literal);
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } for $input;
            holds($self_, $inp) $holds
            message($self2, $fld, $minp) $message
            code($code);
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Struct with fields + auto new ───────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        holds($self_:ident, $inp:ident) $holds:block
        message($self2:ident, $fld:ident, $minp:ident) $message:block
        code($code:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        $crate::rule!(@impl $name for $input;
            holds($self_, $inp) $holds
            message($self2, $fld, $minp) $message
            code($code);
        );
    };

    // ── Generic struct + auto new + factory fn ──────────────────────────
    //
    // One type parameter; bounds must be plain identifiers in scope.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$gen:ident: $first_bound:ident $(+ $rest_bound:ident)*>
            { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        holds($self_:ident, $inp:ident) $holds:block
        message($self2:ident, $fld:ident, $minp:ident) $message:block
        code($code:literal);
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name<$gen> {
            $(pub $field: $fty,)+
        }

        impl<$gen: $first_bound $(+ $rest_bound)*> $name<$gen> {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl<$gen: $first_bound $(+ $rest_bound)*> $crate::Rule for $name<$gen> {
            type Input = $input;

            fn holds(&$self_, $inp: &Self::Input) -> bool $holds

            #[allow(unused_variables)]
            fn violation(&$self2, $fld: &str, $minp: &Self::Input) -> $crate::ValidationError {
                $crate::ValidationError::predicate($fld.to_owned(), $message).with_code($code)
            }
        }

        #[must_use]
        $vis fn $factory<$gen: $first_bound $(+ $rest_bound)*>($($farg: $faty),*) -> $name<$gen> {
            $name::new($($farg),*)
        }
    };

    // ── Internal: `Rule` impl for a non-generic struct ──────────────────
    (@impl $name:ident for $input:ty;
        holds($self_:ident, $inp:ident) $holds:block
        message($self2:ident, $fld:ident, $minp:ident) $message:block
        code($code:literal);
    ) => {
        impl $crate::Rule for $name {
            type Input = $input;

            fn holds(&$self_, $inp: &Self::Input) -> bool $holds

            #[allow(unused_variables)]
            fn violation(&$self2, $fld: &str, $minp: &Self::Input) -> $crate::ValidationError {
                $crate::ValidationError::predicate($fld.to_owned(), $message).with_code($code)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Step, field};

    crate::rule! {
        Even for u32;
        holds(input) { input % 2 == 0 }
        message(field, input) { format!("{field} must be even, got {input}") }
        code("even");
        fn even();
    }

    crate::rule! {
        #[derive(Copy, PartialEq, Eq)]
        MultipleOf { factor: u32 } for u32;
        holds(self, input) { self.factor != 0 && input % self.factor == 0 }
        message(self, field, input) { format!("{field} must be a multiple of {}", self.factor) }
        code("multiple_of");
        fn multiple_of(factor: u32);
    }

    #[test]
    fn test_unit_rule() {
        assert!(even().holds(&4));
        let error = even().violation("Count", &3);
        assert_eq!(error.message(), "Count must be even, got 3");
        assert_eq!(error.code(), Some("even"));
    }

    #[test]
    fn test_struct_rule_through_step() {
        let error = field(7_u32, "Batch")
            .rule(multiple_of(4))
            .validate()
            .unwrap_err();
        assert_eq!(error.field_name(), "Batch");
        assert_eq!(error.message(), "Batch must be a multiple of 4");
        assert_eq!(error.code(), Some("multiple_of"));
        assert_eq!(MultipleOf::new(4), multiple_of(4));
    }

    #[test]
    fn test_unit_rule_derives() {
        use std::collections::HashSet;

        let rule = even();
        let copied = rule;
        assert_eq!(rule, copied);
        assert_eq!(HashSet::from([rule, copied, Even]).len(), 1);
    }

    #[test]
    fn test_rule_passes_value_through() {
        assert_eq!(field(8_u32, "Batch").rule(even()).validate(), Ok(8));
    }
}
