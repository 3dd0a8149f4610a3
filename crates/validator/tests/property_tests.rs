//! Property-based tests for fieldstep-validator.

use std::cell::Cell;

use fieldstep_validator::prelude::*;
use proptest::prelude::*;

// ============================================================================
// FIELD NAME: never changes across type-changing chains
// ============================================================================

proptest! {
    #[test]
    fn field_name_survives_transforms(name in "[A-Za-z ]{1,20}", raw in ".{0,12}") {
        let step = field(raw, name.clone())
            .map(|s| s.len())
            .check(|n| *n < 8, |f| format!("{f} too long"))
            .map(|n| n as u64 * 2);
        prop_assert_eq!(step.field_name(), name.as_str());
        if let Err(error) = step.validate() {
            prop_assert_eq!(error.field_name(), name.as_str());
        }
    }

    #[test]
    fn parse_failure_reports_the_field(name in "[A-Za-z]{1,10}", raw in "[a-z]{1,6}") {
        let error = field(raw, name.clone()).parse::<i32>().validate().unwrap_err();
        prop_assert_eq!(error.field_name(), name.as_str());
        prop_assert_eq!(error.kind, ErrorKind::Transform);
    }
}

// ============================================================================
// SHORT-CIRCUIT: nothing runs after the first failure
// ============================================================================

proptest! {
    #[test]
    fn no_closure_runs_after_failure(value in any::<i32>(), fail_at in 0usize..5) {
        let calls = Cell::new(0_usize);
        let mut step = field(value, "Value");
        for index in 0..5 {
            step = step.check(
                |_| {
                    calls.set(calls.get() + 1);
                    index != fail_at
                },
                |f| format!("{f} failed at {index}"),
            );
        }
        let error = step.validate().unwrap_err();
        prop_assert_eq!(calls.get(), fail_at + 1);
        prop_assert_eq!(error.message(), format!("Value failed at {fail_at}"));
    }

    #[test]
    fn ok_value_satisfies_every_rule(n in any::<i64>()) {
        let result = field(n, "N").min(-1_000).max(1_000).validate();
        match result {
            Ok(value) => prop_assert!((-1_000..=1_000).contains(&value)),
            Err(_) => prop_assert!(!(-1_000..=1_000).contains(&n)),
        }
    }
}

// ============================================================================
// BATCH: first error in input order, values otherwise
// ============================================================================

proptest! {
    #[test]
    fn batch_reports_earliest_failure(values in prop::collection::vec(any::<i16>(), 0..16)) {
        let steps = values
            .iter()
            .enumerate()
            .map(|(i, v)| field(*v, format!("item{i}")).min(0));
        let expected = values.iter().position(|v| *v < 0);

        match (validate_all(steps), expected) {
            (Ok(all), None) => prop_assert_eq!(all, values),
            (Err(error), Some(index)) => prop_assert_eq!(error.field_name(), format!("item{index}")),
            (result, expected) => prop_assert!(false, "{result:?} vs {expected:?}"),
        }
    }
}
