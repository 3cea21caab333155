use serde::{Deserialize, Serialize};

use vendora_core::{DomainResult, ValueObject, require_non_blank};

/// Product reference carried by a sale item.
///
/// A value object: the product master data lives in an external catalog
/// domain, identified by `external_id`; the sale keeps a descriptive
/// snapshot. Immutable after construction, compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    external_id: String,
    name: String,
    description: String,
    category: String,
    brand: String,
}

impl Product {
    /// Build a product reference, validating every field is non-blank.
    pub fn new(
        external_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        brand: impl Into<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            external_id: require_non_blank("external id", external_id)?,
            name: require_non_blank("name", name)?,
            description: require_non_blank("description", description)?,
            category: require_non_blank("category", category)?,
            brand: require_non_blank("brand", brand)?,
        })
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }
}

impl ValueObject for Product {}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Product: {} - {} ({})", self.name, self.brand, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendora_core::DomainError;

    fn valid() -> Product {
        Product::new("PRD-1", "Pale Lager", "330ml bottle", "Beer", "Vendora").unwrap()
    }

    #[test]
    fn constructs_with_all_fields() {
        let product = valid();
        assert_eq!(product.external_id(), "PRD-1");
        assert_eq!(product.brand(), "Vendora");
    }

    #[test]
    fn rejects_blank_fields_naming_them() {
        let cases = [
            ("", "Pale Lager", "330ml bottle", "Beer", "Vendora", "external id"),
            ("PRD-1", " ", "330ml bottle", "Beer", "Vendora", "name"),
            ("PRD-1", "Pale Lager", "", "Beer", "Vendora", "description"),
            ("PRD-1", "Pale Lager", "330ml bottle", "\t", "Vendora", "category"),
            ("PRD-1", "Pale Lager", "330ml bottle", "Beer", "", "brand"),
        ];

        for (ext, name, desc, cat, brand, field) in cases {
            match Product::new(ext, name, desc, cat, brand) {
                Err(DomainError::Validation(msg)) => assert!(msg.contains(field)),
                other => panic!("expected Validation for blank {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn structural_equality() {
        assert_eq!(valid(), valid());
        let other =
            Product::new("PRD-2", "Pale Lager", "330ml bottle", "Beer", "Vendora").unwrap();
        assert_ne!(valid(), other);
    }

    #[test]
    fn display_summarises() {
        assert_eq!(valid().to_string(), "Product: Pale Lager - Vendora (Beer)");
    }
}
