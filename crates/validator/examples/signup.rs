//! Signup form validation example for fieldstep-validator
//!
//! Run with `RUST_LOG=fieldstep_validator=trace cargo run --example signup`
//! to see the fault and batch events.

use std::time::Duration;

use fieldstep_validator::FieldExt;
use fieldstep_validator::prelude::*;
use tracing_subscriber::EnvFilter;

struct SignupForm {
    username: &'static str,
    email: &'static str,
    age: &'static str,
    referral: Option<&'static str>,
}

struct Signup {
    username: String,
    email: &'static str,
    age: u8,
}

/// Stands in for a remote uniqueness check.
async fn username_taken(name: String) -> bool {
    tokio::time::sleep(Duration::from_millis(20)).await;
    matches!(name.as_str(), "admin" | "root")
}

/// Stands in for a remote referral lookup that may fail.
async fn referral_owner(code: &'static str) -> Result<String, String> {
    tokio::time::sleep(Duration::from_millis(10)).await;
    match code {
        "WELCOME" => Ok(String::from("ada")),
        other => Err(format!("referral code {other} does not exist")),
    }
}

async fn validate(form: SignupForm) -> ValidationResult<Signup> {
    let (username, email, age) = (
        form.username
            .field("Username")
            .trimmed()
            .length_between(3, 16)
            .check_async(
                |name| {
                    let name = name.clone();
                    async move { !username_taken(name).await }
                },
                |f| format!("{f} is already taken"),
            ),
        form.email.field("Email").not_empty().email().to_async(),
        form.age.field("Age").parse::<u8>().in_range(13, 120).to_async(),
    )
        .validate_all_async()
        .await?;

    if let Some(code) = form.referral {
        field_async(referral_owner(code), "Referral").not_empty().await?;
    }

    Ok(Signup {
        username,
        email,
        age,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let forms = [
        SignupForm {
            username: "  alice ",
            email: "alice@example.com",
            age: "29",
            referral: Some("WELCOME"),
        },
        SignupForm {
            username: "admin",
            email: "root@example.com",
            age: "40",
            referral: None,
        },
        SignupForm {
            username: "bob",
            email: "bob-at-example",
            age: "abc",
            referral: None,
        },
        SignupForm {
            username: "carol",
            email: "carol@example.com",
            age: "35",
            referral: Some("FRIEND"),
        },
    ];

    for form in forms {
        match validate(form).await {
            Ok(signup) => println!(
                "✓ accepted {} <{}>, age {}",
                signup.username, signup.email, signup.age
            ),
            Err(error) => println!("✗ {}: {error}", error.field_name()),
        }
    }
}
