//! HTTP surface of the service and the mapping from service errors to
//! responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde::Serialize;

use crate::repository::errors::RepositoryError;
use crate::services::{ServiceError, ServiceResult};

pub mod customer;

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct StandardError {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMessage {
    pub field_name: String,
    pub message: String,
}

impl ServiceError {
    fn field_messages(&self) -> Vec<FieldMessage> {
        let ServiceError::Validation(errors) = self else {
            return Vec::new();
        };

        let mut messages: Vec<FieldMessage> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldMessage {
                    field_name: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        messages.sort_by(|a, b| a.field_name.cmp(&b.field_name));
        messages
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) | ServiceError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            ServiceError::DataIntegrity(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_)
            | ServiceError::BadRequest(_)
            | ServiceError::TypeConstraint(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) | ServiceError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() {
            log::error!("Request failed: {self}");
            "Erro interno do servidor.".to_string()
        } else {
            match self {
                ServiceError::Validation(_) => "Erro de validação".to_string(),
                other => other.to_string(),
            }
        };

        HttpResponse::build(status).json(StandardError {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            timestamp: chrono::Utc::now().timestamp_millis(),
            errors: self.field_messages(),
        })
    }
}

/// Runs a synchronous service call on the blocking thread pool.
pub async fn run_blocking<F, T>(f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| ServiceError::Internal(format!("Blocking task failed: {e}")))?
}

/// Registers the `/clientes` resource and the extractor configs that turn
/// malformed bodies or query strings into `400` responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::BadRequest(format!("Corpo da requisição inválido: {err}")).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ServiceError::BadRequest(format!("Parâmetros inválidos: {err}")).into()
    }))
    .service(
        web::scope("/clientes")
            .service(customer::list_customers_page)
            .service(customer::list_customers)
            .service(customer::create_customer)
            .service(customer::show_customer)
            .service(customer::update_customer)
            .service(customer::delete_customer),
    );
}
