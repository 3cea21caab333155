use serde::{Deserialize, Serialize};

use vendora_core::{DomainResult, ValueObject, require_non_blank};

/// Branch (point of sale) reference carried by a sale.
///
/// Immutable value object, compared by value; keyed to the external branch
/// domain by `external_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch {
    external_id: String,
    name: String,
    address: String,
    city: String,
    state: String,
}

impl Branch {
    /// Build a branch reference, validating every field is non-blank.
    pub fn new(
        external_id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            external_id: require_non_blank("external id", external_id)?,
            name: require_non_blank("name", name)?,
            address: require_non_blank("address", address)?,
            city: require_non_blank("city", city)?,
            state: require_non_blank("state", state)?,
        })
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

impl ValueObject for Branch {}

impl core::fmt::Display for Branch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Branch: {} - {}, {}", self.name, self.city, self.state)
    }
}
