//! Customer record and its JSON shape

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `customers` table.
///
/// Decoding is lenient: absent fields take their default value and unknown
/// fields are ignored, so every body is a full replacement of the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub contacted: bool,
}

/// Everything about a customer except its store-assigned `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub contacted: bool,
}

impl Customer {
    /// Drop the `id`, keeping the mutable fields.
    pub fn into_fields(self) -> CustomerFields {
        CustomerFields {
            name: self.name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            contacted: self.contacted,
        }
    }
}

impl CustomerFields {
    /// Attach an identifier, producing a full record.
    pub fn with_id(self, id: i32) -> Customer {
        Customer {
            id,
            name: self.name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            contacted: self.contacted,
        }
    }
}
