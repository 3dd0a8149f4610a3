//! Built-in rules
//!
//! Each submodule declares its rules with [`rule!`](crate::rule!) and exposes
//! them as extension-trait methods on every [`Step`](crate::Step), so the
//! same vocabulary works on synchronous and asynchronous chains.

mod numeric;
mod option;
mod string;

pub use numeric::{InRange, Max, Min, NumericRules, in_range, max, min};
pub use option::OptionRules;
#[cfg(feature = "regex")]
pub use string::{Email, Matches, email, matches};
pub use string::{
    LengthBetween, MaxLength, MinLength, NotEmpty, StringRules, length_between, max_length,
    min_length, not_empty,
};
