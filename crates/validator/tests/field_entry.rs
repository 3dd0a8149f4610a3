//! Integration tests for field entry points and result adapters.

use std::time::Duration;

use fieldstep_validator::PendingFieldExt;
use fieldstep_validator::prelude::*;
use pretty_assertions::assert_eq;

#[derive(Debug)]
struct Account {
    id: u32,
    email: String,
}

async fn load_account(id: u32) -> Result<Account, String> {
    tokio::task::yield_now().await;
    if id == 0 {
        Err(format!("account {id} not found"))
    } else {
        Ok(Account {
            id,
            email: format!("user{id}@example.com"),
        })
    }
}

// ============================================================================
// PENDING VALUES
// ============================================================================

#[tokio::test]
async fn rejected_pending_value_becomes_field_init_error() {
    let error = field_async(load_account(0), "Account").await.unwrap_err();
    assert_eq!(error.field_name(), "Account");
    assert_eq!(error.message(), "account 0 not found");
    assert_eq!(error.kind, ErrorKind::FieldInit);
    assert!(error.diagnostic().unwrap().contains("field_entry.rs"));
}

#[tokio::test]
async fn resolved_pending_value_flows_through_chain() {
    let email = load_account(7)
        .field_async("Account")
        .map(|account| account.email)
        .email()
        .await;
    assert_eq!(email, Ok(String::from("user7@example.com")));
}

#[tokio::test]
async fn pending_rejection_skips_chain() {
    let error = field_async(load_account(0), "Account")
        .map(|account| account.id)
        .min(100)
        .await
        .unwrap_err();
    assert_eq!(error.message(), "account 0 not found");
}

async fn crashing_lookup() -> Result<u32, String> {
    panic!("lookup table corrupted")
}

#[tokio::test]
async fn panicking_pending_value_is_captured() {
    let error = field_async(crashing_lookup(), "Quota").await.unwrap_err();
    assert_eq!(error.message(), "lookup table corrupted");
    assert_eq!(error.kind, ErrorKind::FieldInit);
}

#[tokio::test]
async fn timeout_wraps_the_pending_value() {
    let slow = async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok::<_, String>(1_u32)
    };
    let guarded = async move {
        tokio::time::timeout(Duration::from_millis(10), slow)
            .await
            .map_err(|elapsed| elapsed.to_string())?
    };
    let error = field_async(guarded, "Balance").await.unwrap_err();
    assert_eq!(error.field_name(), "Balance");
    assert_eq!(error.message(), "deadline has elapsed");
}

#[tokio::test]
async fn infallible_future_entry() {
    let step = field_future(async { 64_u16 }, "Width").in_range(1, 1024);
    assert_eq!(step.await, Ok(64));
}

// ============================================================================
// ADAPTERS
// ============================================================================

#[test]
fn failed_labelled_input_round_trips() {
    let labelled = ValidationError::new("Email", "Email must not be empty");
    let lifted = from_result::<String>(Err(labelled.clone()), "Email");
    assert_eq!(lifted.validate(), Err(labelled));
}

#[test]
fn lifted_success_continues_chain() {
    let step = from_result(Ok("42"), "Answer").parse::<u8>();
    assert_eq!(step.validate(), Ok(42));
}

#[test]
fn lifted_error_is_relabelled_and_propagated() {
    let foreign = ValidationError::predicate("legacy_email", "Email must not be empty");
    let error = from_result::<&str>(Err(foreign), "Email")
        .not_empty()
        .validate()
        .unwrap_err();
    assert_eq!(error.field_name(), "Email");
    assert_eq!(error.kind, ErrorKind::Propagated);
}

#[tokio::test]
async fn async_result_adapter() {
    let ok = from_async_result(async { Ok(5_i32) }, "Score").min(1);
    assert_eq!(ok.await, Ok(5));

    let failing = async { Err::<i32, _>(ValidationError::new("remote", "rejected upstream")) };
    let error = from_async_result(failing, "Score").await.unwrap_err();
    assert_eq!(error, ValidationError::new("Score", "rejected upstream"));
    assert_eq!(error.kind, ErrorKind::Propagated);
}

async fn crashing_upstream() -> ValidationResult<i32> {
    panic!("upstream validator crashed")
}

#[tokio::test]
async fn async_result_adapter_captures_panic() {
    let error = from_async_result(crashing_upstream(), "Score")
        .min(1)
        .await
        .unwrap_err();
    assert_eq!(error.field_name(), "Score");
    assert_eq!(error.message(), "upstream validator crashed");
    assert_eq!(error.kind, ErrorKind::FieldInit);
    assert!(error.diagnostic().unwrap().contains("field_entry.rs"));
}
