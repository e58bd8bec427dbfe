//! Views exchanged with API clients for the `/clientes` resource.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::customer::Customer;
use crate::domain::types::TaxId;

/// Id, name and email only. Returned by the listings and accepted by updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct CustomerSummaryView {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 120, message = "O tamanho deve ser entre 1 e 120 caracteres"))]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
}

impl From<&Customer> for CustomerSummaryView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: Some(customer.id.get()),
            name: customer.name.clone(),
            email: customer.email.clone(),
        }
    }
}

impl From<Customer> for CustomerSummaryView {
    fn from(customer: Customer) -> Self {
        Self::from(&customer)
    }
}

/// Payload accepted when registering a customer: personal data, one address
/// and up to three phones. The password is plaintext and only used here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerCreateView {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 120, message = "O tamanho deve ser entre 1 e 120 caracteres"))]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[serde(rename = "cpf")]
    #[validate(custom(function = "validate_tax_id"))]
    pub tax_id: String,
    #[serde(rename = "rg")]
    #[validate(length(min = 1, message = "Preenchimento obrigatório"))]
    pub registry_id: String,
    #[serde(rename = "renda", default)]
    #[validate(range(min = 0.0, message = "A renda não pode ser negativa"))]
    pub income: f64,
    #[serde(rename = "senha")]
    #[validate(length(min = 1, message = "Preenchimento obrigatório"))]
    pub password: String,

    #[serde(rename = "logradouro")]
    #[validate(length(min = 1, message = "Preenchimento obrigatório"))]
    pub street: String,
    #[serde(rename = "numero")]
    #[validate(length(min = 1, message = "Preenchimento obrigatório"))]
    pub number: String,
    #[serde(rename = "complemento", default)]
    pub complement: Option<String>,
    #[serde(rename = "bairro")]
    #[validate(length(min = 1, message = "Preenchimento obrigatório"))]
    pub neighborhood: String,
    #[serde(rename = "cep")]
    #[validate(length(min = 1, message = "Preenchimento obrigatório"))]
    pub postal_code: String,

    #[serde(rename = "telefone1")]
    #[validate(length(min = 1, message = "Preenchimento obrigatório"))]
    pub phone1: String,
    #[serde(rename = "telefone2", default)]
    pub phone2: Option<String>,
    #[serde(rename = "telefone3", default)]
    pub phone3: Option<String>,

    #[serde(rename = "cidadeId")]
    #[validate(range(min = 1, message = "Cidade inválida"))]
    pub city_id: i32,
}

fn validate_tax_id(value: &str) -> Result<(), ValidationError> {
    TaxId::new(value).map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("cpf");
        error.message = Some("CPF inválido".into());
        error
    })
}

/// Query string of `GET /clientes/page`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPageParams {
    pub page: Option<usize>,
    pub lines_per_page: Option<usize>,
    pub direction: Option<String>,
    pub order_by: Option<String>,
}
