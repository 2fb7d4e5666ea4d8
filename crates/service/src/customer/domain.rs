use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use models::customer::{normalize_email, normalize_name, normalize_phone};

use super::errors::CustomerError;

/// Registration input, as received from callers (untrimmed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCustomerInput {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
}

/// Validated and normalized fields ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl NewCustomer {
    /// Checks run in order: name, email, phone.
    pub fn from_input(input: &CreateCustomerInput) -> Result<Self, CustomerError> {
        let name = normalize_name(&input.name)?;
        let email = normalize_email(&input.email)?;
        let phone = normalize_phone(input.phone.as_deref())?;
        Ok(Self { name, email, phone })
    }
}

/// Domain customer (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(rename = "atualizado_em")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
