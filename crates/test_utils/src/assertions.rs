//! Custom Test Assertions
//!
//! Assertion helpers for [`PortError`] that print the full error on failure.

use core_kernel::PortError;

/// Asserts the result failed with a validation error naming `field`
pub fn assert_field_error<T: std::fmt::Debug>(result: &Result<T, PortError>, field: &str) {
    match result {
        Err(error @ PortError::Validation { .. }) => {
            assert!(
                error.field_errors().iter().any(|e| e.field == field),
                "Expected a validation error on '{}', got {:?}",
                field,
                error.field_errors()
            );
        }
        other => panic!("Expected a validation error on '{}', got {:?}", field, other),
    }
}

/// Asserts the result failed with NotFound
pub fn assert_not_found<T: std::fmt::Debug>(result: &Result<T, PortError>) {
    assert!(
        matches!(result, Err(PortError::NotFound { .. })),
        "Expected NotFound, got {:?}",
        result
    );
}

/// Asserts the result failed with Conflict
pub fn assert_conflict<T: std::fmt::Debug>(result: &Result<T, PortError>) {
    assert!(
        matches!(result, Err(PortError::Conflict { .. })),
        "Expected Conflict, got {:?}",
        result
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_field_error_matches() {
        let result: Result<(), PortError> = Err(PortError::validation_field("policy", "bad"));
        assert_field_error(&result, "policy");
    }

    #[test]
    #[should_panic(expected = "Expected a validation error on 'name'")]
    fn test_assert_field_error_rejects_other_field() {
        let result: Result<(), PortError> = Err(PortError::validation_field("policy", "bad"));
        assert_field_error(&result, "name");
    }

    #[test]
    #[should_panic(expected = "Expected NotFound")]
    fn test_assert_not_found_rejects_ok() {
        assert_not_found(&Ok::<_, PortError>(1));
    }

    #[test]
    fn test_assert_conflict() {
        assert_conflict(&Err::<(), _>(PortError::conflict("taken")));
    }
}
