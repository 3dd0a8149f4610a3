//! Integration tests for chain semantics across both step forms.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fieldstep_validator::FieldExt;
use fieldstep_validator::prelude::*;
use pretty_assertions::assert_eq;

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn empty_email_reports_field_and_message() {
    let result = ""
        .field("Email")
        .check(|v| !v.is_empty(), |f| format!("{f} is empty"))
        .validate();
    assert_eq!(result, Err(ValidationError::new("Email", "Email is empty")));
}

#[test]
fn age_within_bounds_is_parsed() {
    let age = "30".field("Age").parse::<u32>().min(18).max(65).validate();
    assert_eq!(age, Ok(30));
}

#[test]
fn failed_parse_skips_later_rules() {
    let min_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&min_calls);

    let error = "12x"
        .field("N")
        .try_map(|v| v.parse::<i64>(), |f| format!("{f} must be a number"))
        .check(
            move |v| {
                counter.fetch_add(1, Ordering::SeqCst);
                *v >= 100
            },
            |f| format!("{f} must be at least 100"),
        )
        .validate()
        .unwrap_err();

    assert_eq!(error.field_name(), "N");
    assert_eq!(error.message(), "N must be a number");
    assert_eq!(min_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn type_changes_keep_field_name() {
    let step = "  7  "
        .field("Quantity")
        .trimmed()
        .parse::<u8>()
        .map(u32::from)
        .map(|n| n * 100);
    assert_eq!(step.field_name(), "Quantity");
    assert_eq!(step.validate(), Ok(700));
}

#[test]
fn error_message_for_form_callbacks() {
    let valid = "ok".field("Note").not_empty();
    let invalid = "".field("Note").not_empty();
    assert_eq!(valid.error_message(), None);
    assert_eq!(invalid.error_message().as_deref(), Some("Note must not be empty"));
}

#[test]
fn question_mark_propagates_errors() {
    fn parse_port(raw: &'static str) -> ValidationResult<u16> {
        let port = raw.field("Port").parse::<u16>().min(1024).validate()?;
        Ok(port)
    }

    assert_eq!(parse_port("8080"), Ok(8080));
    assert_eq!(parse_port("80").unwrap_err().message(), "Port must be at least 1024");
}

// ============================================================================
// FAULTS
// ============================================================================

#[test]
fn panicking_bind_becomes_error_with_call_site() {
    let error = field(vec![1, 2, 3], "Items")
        .bind(|items| Ok(items[10]))
        .validate()
        .unwrap_err();
    assert_eq!(error.field_name(), "Items");
    assert_eq!(error.kind, ErrorKind::Bound);
    assert!(error.diagnostic().unwrap().contains("step_chain.rs"));
}

#[test]
fn rule_code_survives_chain() {
    let error = "x".field("Handle").min_length(3).max_length(10).validate().unwrap_err();
    assert_eq!(error.code(), Some("min_length"));
    assert_eq!(error.kind, ErrorKind::Predicate);
}

// ============================================================================
// SYNC / ASYNC INTERPLAY
// ============================================================================

async fn is_available(name: String) -> bool {
    tokio::task::yield_now().await;
    name != "admin"
}

#[tokio::test]
async fn sync_chain_upgrades_to_async() {
    let name = field(String::from("alice"), "Username")
        .min_length(3)
        .check_async(|n| is_available(n.clone()), |f| format!("{f} is taken"))
        .max_length(16)
        .await;
    assert_eq!(name, Ok(String::from("alice")));
}

#[tokio::test]
async fn async_predicate_failure() {
    let error = field(String::from("admin"), "Username")
        .check_async(|n| is_available(n.clone()), |f| format!("{f} is taken"))
        .validate()
        .await
        .unwrap_err();
    assert_eq!(error, ValidationError::new("Username", "Username is taken"));
}

#[tokio::test]
async fn async_chain_embeds_sync_sub_chain() {
    let count = field_async(async { Ok::<_, String>("  42 ") }, "Count")
        .then(|step| step.trimmed().parse::<u32>().in_range(1, 100))
        .await;
    assert_eq!(count, Ok(42));
}

#[tokio::test]
async fn sync_and_async_forms_agree() {
    let sync = "17".field("Age").parse::<u32>().min(18).validate();
    let deferred = "17".field("Age").to_async().parse::<u32>().min(18).validate().await;
    assert_eq!(sync, deferred);
}

#[tokio::test]
async fn async_transform_runs_once_after_await() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let step = field(3_u32, "Level").try_map_async(
        move |v| async move {
            counter.fetch_add(1, Ordering::SeqCst);
            u8::try_from(v * 10)
        },
        |f| format!("{f} overflowed"),
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(step.await, Ok(30_u8));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn long_chains_agree_in_both_forms() {
    const OPS: usize = 100_000;
    let non_negative = |v: &i64| *v >= 0;

    let sync = (0..OPS).fold(field(0_i64, "Total"), |step, _| {
        step.check(non_negative, |f| format!("{f} went negative"))
    });
    let deferred = (0..OPS).fold(field(0_i64, "Total").to_async(), |step, _| {
        step.check(non_negative, |f| format!("{f} went negative"))
    });

    assert_eq!(sync.validate(), Ok(0));
    assert_eq!(deferred.await, Ok(0));
}
