use serde::{Deserialize, Serialize};

use vendora_core::{DomainResult, ValueObject, require_non_blank};

/// Customer reference carried by a sale.
///
/// The customer master data lives in an external domain; the sale keeps a
/// descriptive snapshot keyed by `external_id`. Immutable, compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    external_id: String,
    name: String,
    email: String,
    phone: String,
}

impl Customer {
    /// Build a customer reference, validating every field is non-blank.
    pub fn new(
        external_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            external_id: require_non_blank("external id", external_id)?,
            name: require_non_blank("name", name)?,
            email: require_non_blank("email", email)?,
            phone: require_non_blank("phone", phone)?,
        })
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

impl ValueObject for Customer {}

impl core::fmt::Display for Customer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Customer: {} ({})", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendora_core::DomainError;

    #[test]
    fn constructs_with_all_fields() {
        let customer =
            Customer::new("CUST-7", "Ana Souza", "ana@example.com", "+55 11 99999-0000").unwrap();
        assert_eq!(customer.external_id(), "CUST-7");
        assert_eq!(customer.to_string(), "Customer: Ana Souza (ana@example.com)");
    }

    #[test]
    fn rejects_blank_fields() {
        for (ext, name, email, phone, field) in [
            ("", "Ana", "a@b.c", "1", "external id"),
            ("C", "", "a@b.c", "1", "name"),
            ("C", "Ana", "  ", "1", "email"),
            ("C", "Ana", "a@b.c", "", "phone"),
        ] {
            match Customer::new(ext, name, email, phone) {
                Err(DomainError::Validation(msg)) => assert!(msg.contains(field)),
                other => panic!("expected Validation for blank {field}, got {other:?}"),
            }
        }
    }
}
