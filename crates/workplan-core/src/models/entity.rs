//! Counterparty entity model.

use serde::{Deserialize, Serialize};

/// One of the two organisations a plan is exchanged between.
///
/// No field is required; an entity with an empty name is treated as absent
/// by the renderers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Entity {
    /// Legal or trading name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Tax or registration identifier
    #[serde(rename = "rut")]
    pub tax_id: String,

    /// Postal address
    #[serde(rename = "direccion")]
    pub address: String,

    /// Phone number
    #[serde(rename = "telefono")]
    pub phone: String,

    /// Contact email
    pub email: String,

    /// Contact person
    #[serde(rename = "contacto")]
    pub contact: String,
}

impl Entity {
    /// Whether the entity should be shown at all.
    pub fn is_present(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
