//! Error type for failed field validation
//!
//! Every step that leaves the `Ok` state ends up holding exactly one
//! [`ValidationError`]. The error always names the field it belongs to, so a
//! caller batching many fields can tell which one failed without extra
//! bookkeeping.
//!
//! All string fields use `Cow<'static, str>` so that static field names and
//! messages never allocate.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Where in a chain a [`ValidationError`] originated.
///
/// The kind is informational. It never takes part in equality and the core
/// never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// A pending value handed to the field entry point failed to resolve.
    FieldInit,
    /// A `check` predicate returned `false` or panicked.
    Predicate,
    /// A `try_map`/`map` transformation failed or panicked.
    Transform,
    /// A `bind` function returned an error explicitly.
    #[default]
    Bound,
    /// The error entered the chain from outside, e.g. through `from_result`.
    Propagated,
}

impl ErrorKind {
    /// Stable snake_case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FieldInit => "field_init",
            Self::Predicate => "predicate",
            Self::Transform => "transform",
            Self::Bound => "bound",
            Self::Propagated => "propagated",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A failed validation of a single field.
///
/// Displays as the message verbatim; the field name is kept separately in
/// [`field_name`](Self::field_name) so no formatting is imposed on the message.
///
/// Two errors are equal when their field, message and diagnostic agree.
/// [`kind`](Self::kind) and [`code`](Self::code) are ignored by `==`.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldstep_validator::ValidationError;
///
/// let error = ValidationError::new("Email", "Email is empty").with_code("not_empty");
/// assert_eq!(error.to_string(), "Email is empty");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable name of the field under validation.
    pub field: Cow<'static, str>,

    /// Plain-text message, usually naming the field and the violated rule.
    pub message: Cow<'static, str>,

    /// Capture-site context for debugging, e.g. `src/signup.rs:41:10`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub diagnostic: Option<Cow<'static, str>>,

    /// Where the failure originated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ErrorKind,

    /// Optional machine-readable tag set by rules, e.g. `"min_length"`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub code: Option<Cow<'static, str>>,
}

impl ValidationError {
    /// Creates an error for `field` with the given message.
    ///
    /// The kind defaults to [`ErrorKind::Bound`], which is what a `bind`
    /// closure returning this error reports.
    pub fn new(field: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            diagnostic: None,
            kind: ErrorKind::Bound,
            code: None,
        }
    }

    /// Creates a predicate failure.
    pub fn predicate(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(field, message).with_kind(ErrorKind::Predicate)
    }

    /// Creates a transformation failure.
    pub fn transform(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(field, message).with_kind(ErrorKind::Transform)
    }

    /// Creates a field-initialization failure.
    pub fn field_init(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(field, message).with_kind(ErrorKind::FieldInit)
    }

    /// Sets the kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the machine-readable code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attaches diagnostic context.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_diagnostic(mut self, diagnostic: impl Into<Cow<'static, str>>) -> Self {
        self.diagnostic = Some(diagnostic.into());
        self
    }

    /// Re-attributes the error to `field`, overriding any previous label.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = field.into();
        self
    }

    /// Name of the field that failed.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostic context, if any was captured.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Machine-readable code, if the producing rule set one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.message == other.message
            && self.diagnostic == other.diagnostic
    }
}

impl Eq for ValidationError {}

/// A validation result using [`ValidationError`].
pub type ValidationResult<T> = Result<T, ValidationError>;

// ============================================================================
// TESTS
// ============================================================================
