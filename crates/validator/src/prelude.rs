//! Prelude module for convenient imports.
//!
//! Provides a single `use fieldstep_validator::prelude::*;` import that brings
//! in the entry points, both step forms, the batch helpers and every rule
//! extension trait.
//!
//! The method forms [`FieldExt`](crate::FieldExt) and
//! [`PendingFieldExt`](crate::PendingFieldExt) are not included. `FieldExt`
//! is implemented for every type, so a glob import would shadow unrelated
//! `field` methods such as `DebugStruct::field`; import it by name instead.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldstep_validator::FieldExt;
//! use fieldstep_validator::prelude::*;
//!
//! let (name, age) = (
//!     "ada".field("Name").not_empty(),
//!     "36".field("Age").parse::<u8>().in_range(0, 150),
//! )
//!     .validate_all()?;
//! ```

// ============================================================================
// CORE: Steps, errors, entry points
// ============================================================================

pub use crate::error::{ErrorKind, ValidationError, ValidationResult};
pub use crate::field::{field, field_async, field_future, from_async_result, from_result};
pub use crate::step::{AsyncStep, Step, SyncStep};

// ============================================================================
// BATCH
// ============================================================================

pub use crate::batch::{
    AsyncStepTuple, StepTuple, validate_all, validate_all_async, validate_all_async_with,
};
pub use crate::config::BatchOptions;

// ============================================================================
// RULES
// ============================================================================

pub use crate::rule::Rule;
pub use crate::rules::{NumericRules, OptionRules, StringRules};
