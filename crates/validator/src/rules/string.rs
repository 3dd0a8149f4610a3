//! String rules
//!
//! Lengths are counted in `char`s, not bytes.

use std::borrow::Borrow;
use std::fmt::Display;
use std::str::FromStr;
#[cfg(feature = "regex")]
use std::sync::LazyLock;

use crate::error::ValidationError;
use crate::rule;
use crate::step::Step;

#[cfg(feature = "regex")]
static EMAIL_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

// ============================================================================
// LENGTH
// ============================================================================

rule! {
    pub NotEmpty for str;
    holds(input) { !input.is_empty() }
    message(field, input) { format!("{field} must not be empty") }
    code("not_empty");
    fn not_empty();
}

rule! {
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinLength { min: usize } for str;
    holds(self, input) { input.chars().count() >= self.min }
    message(self, field, input) {
        format!("{field} must be at least {} characters long", self.min)
    }
    code("min_length");
    fn min_length(min: usize);
}

rule! {
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxLength { max: usize } for str;
    holds(self, input) { input.chars().count() <= self.max }
    message(self, field, input) {
        format!("{field} must be at most {} characters long", self.max)
    }
    code("max_length");
    fn max_length(max: usize);
}

rule! {
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub LengthBetween { min: usize, max: usize } for str;
    holds(self, input) { (self.min..=self.max).contains(&input.chars().count()) }
    message(self, field, input) {
        format!("{field} must be between {} and {} characters long", self.min, self.max)
    }
    code("length_between");
    new(min: usize, max: usize) {
        if min <= max { Self { min, max } } else { Self { min: max, max: min } }
    }
    fn length_between(min: usize, max: usize);
}

// ============================================================================
// PATTERNS
// ============================================================================

#[cfg(feature = "regex")]
rule! {
    pub Matches { pattern: regex::Regex } for str;
    holds(self, input) { self.pattern.is_match(input) }
    message(self, field, input) {
        format!("{field} must match the pattern {}", self.pattern.as_str())
    }
    code("pattern");
    fn matches(pattern: regex::Regex);
}

#[cfg(feature = "regex")]
rule! {
    pub Email for str;
    holds(input) { EMAIL_PATTERN.is_match(input) }
    message(field, input) { format!("{field} must be a valid email address") }
    code("email");
    fn email();
}

// ============================================================================
// EXTENSION TRAIT
// ============================================================================

/// String rules for any step whose value borrows as `str`
/// (`&str`, `String`, `Cow<str>`, ...).
pub trait StringRules: Step<Value: Borrow<str>> {
    /// Fails when the value is the empty string.
    #[track_caller]
    fn not_empty(self) -> Self {
        self.rule(NotEmpty)
    }

    /// Fails when the value has fewer than `min` characters.
    #[track_caller]
    fn min_length(self, min: usize) -> Self {
        self.rule(MinLength::new(min))
    }

    /// Fails when the value has more than `max` characters.
    #[track_caller]
    fn max_length(self, max: usize) -> Self {
        self.rule(MaxLength::new(max))
    }

    /// Fails unless the character count lies in `min..=max`.
    #[track_caller]
    fn length_between(self, min: usize, max: usize) -> Self {
        self.rule(LengthBetween::new(min, max))
    }

    /// Fails unless `pattern` matches somewhere in the value.
    #[cfg(feature = "regex")]
    #[track_caller]
    fn matches(self, pattern: regex::Regex) -> Self {
        self.rule(Matches::new(pattern))
    }

    /// Fails unless the value looks like an email address.
    #[cfg(feature = "regex")]
    #[track_caller]
    fn email(self) -> Self {
        self.rule(Email)
    }

    /// Replaces the value with an owned, whitespace-trimmed copy.
    #[track_caller]
    fn trimmed(self) -> Self::Next<String> {
        self.map(|value| {
            let text: &str = value.borrow();
            text.trim().to_owned()
        })
    }

    /// Parses the value with [`FromStr`].
    ///
    /// A parse error is reported as a transformation failure that includes
    /// the parser's own message.
    #[track_caller]
    fn parse<R>(self) -> Self::Next<R>
    where
        R: FromStr + Send + 'static,
        R::Err: Display,
    {
        self.transform(|value, field| {
            let text: &str = value.borrow();
            text.parse::<R>().map_err(|error| {
                ValidationError::transform(field.to_owned(), format!("{field} is invalid: {error}"))
                    .with_code("parse")
            })
        })
    }
}

impl<S> StringRules for S where S: Step<Value: Borrow<str>> {}
