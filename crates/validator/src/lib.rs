//! # fieldstep-validator
//!
//! Single-field validation chains with immediate and deferred execution.
//!
//! A chain starts from a value and the human-readable name of the field it
//! belongs to, threads the value through checks and type-changing
//! conversions, and ends with either the validated value or a
//! [`ValidationError`] naming the field that failed.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldstep_validator::FieldExt;
//! use fieldstep_validator::prelude::*;
//!
//! let email = "".field("Email")
//!     .check(|v| !v.is_empty(), |f| format!("{f} is empty"))
//!     .validate();
//! assert_eq!(email.unwrap_err().message(), "Email is empty");
//!
//! let age: u32 = "30".field("Age").parse().min(18).max(65).validate()?;
//! ```
//!
//! ## Async chains
//!
//! [`field_async`] accepts a pending value; any failure while it resolves
//! becomes a validation error for that field. Synchronous chains switch to
//! the deferred form with [`SyncStep::to_async`] or any `*_async` operation,
//! and an async chain can embed a synchronous sub-chain with
//! [`AsyncStep::then`].
//!
//! ```rust,ignore
//! let owner = field_async(load_user(id), "Owner")
//!     .check_async(|user| is_active(user.id), |f| format!("{f} is inactive"))
//!     .then(|step| step.map(|user| user.name).not_empty())
//!     .await?;
//! ```
//!
//! ## Batches
//!
//! [`validate_all`], [`validate_all_async`] and the [`StepTuple`] /
//! [`AsyncStepTuple`] traits run many field chains and return every value, or
//! the error of the first failing field in input order.
//!
//! ## Rules
//!
//! Built-in rules live in [`rules`] as extension traits on [`Step`]. Custom
//! ones are declared with the [`rule!`] macro.
//!
//! ## Feature flags
//!
//! - `regex` (default): pattern and email rules.
//! - `serde`: `Serialize`/`Deserialize` for errors and [`BatchOptions`].

// Every step carries a full ValidationError by value; boxing it would add an
// allocation to every failing chain.
#![allow(clippy::result_large_err)]

pub mod batch;
pub mod config;
pub mod error;
mod fault;
pub mod field;
pub mod prelude;
pub mod rule;
pub mod rules;
pub mod step;

pub use batch::{
    AsyncStepTuple, StepTuple, validate_all, validate_all_async, validate_all_async_with,
};
pub use config::BatchOptions;
pub use error::{ErrorKind, ValidationError, ValidationResult};
pub use field::{
    FieldExt, PendingFieldExt, field, field_async, field_future, from_async_result, from_result,
};
pub use rule::Rule;
pub use step::{AsyncStep, Step, SyncStep};
