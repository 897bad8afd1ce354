//! Shared behavior for domain types

/// Trait for types that can validate themselves
pub trait Validator {
    /// Validates the instance and returns errors if invalid
    fn validate(&self) -> Result<(), Vec<String>>;

    /// Returns true if the instance is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_trait() {
        struct TestType {
            value: i32,
        }

        impl Validator for TestType {
            fn validate(&self) -> Result<(), Vec<String>> {
                if self.value < 0 {
                    Err(vec!["Value must be positive".to_string()])
                } else {
                    Ok(())
                }
            }
        }

        let valid = TestType { value: 10 };
        let invalid = TestType { value: -5 };

        assert!(valid.is_valid());
        assert!(!invalid.is_valid());
    }
}
