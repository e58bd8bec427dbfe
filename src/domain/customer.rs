use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CityId, CustomerEmail, CustomerId, CustomerName, PhoneNumber, RegistryId, TaxId,
};
use crate::domain::location::City;

/// Persisted customer together with its owned addresses and phones.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "rg")]
    pub registry_id: String,
    #[serde(rename = "renda")]
    pub income: f64,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(rename = "enderecos")]
    pub addresses: Vec<Address>,
    #[serde(rename = "telefones")]
    pub phones: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub id: i32,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento")]
    pub complement: Option<String>,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "cidade")]
    pub city: City,
}

/// Address attached to a customer that has not been stored yet. The city is
/// referenced by id only.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAddress {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
    pub city_id: CityId,
}

/// Customer built from the creation payload. There is no id field: the store
/// assigns one on insert.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCustomer {
    pub name: CustomerName,
    pub email: CustomerEmail,
    pub tax_id: TaxId,
    pub registry_id: RegistryId,
    pub income: f64,
    pub password_hash: String,
    pub addresses: Vec<NewAddress>,
    pub phones: Vec<PhoneNumber>,
}

/// Changes accepted by the update path. Only name and email are ever copied
/// onto the stored record.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateCustomer {
    pub id: Option<CustomerId>,
    pub name: CustomerName,
    pub email: CustomerEmail,
}

impl UpdateCustomer {
    /// Returns `existing` with name and email replaced, everything else kept.
    #[must_use]
    pub fn merge_into(&self, existing: Customer) -> Customer {
        Customer {
            name: self.name.as_str().to_string(),
            email: self.email.as_str().to_string(),
            ..existing
        }
    }
}
