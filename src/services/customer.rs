//! Customer workflows behind the `/clientes` routes.

use std::any::type_name;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::domain::customer::{Customer, NewAddress, NewCustomer, UpdateCustomer};
use crate::domain::types::{
    CityId, CustomerEmail, CustomerId, CustomerName, PhoneNumber, RegistryId, TaxId,
};
use crate::dto::customer::{CustomerCreateView, CustomerSummaryView};
use crate::pagination::Page;
use crate::repository::errors::RepositoryError;
use crate::repository::{
    CustomerPageQuery, CustomerReader, CustomerSortField, CustomerWriter, SortDirection,
};
use crate::services::{ServiceError, ServiceResult};

pub const DELETE_BLOCKED_MESSAGE: &str =
    "Não é possível excluir um cliente porque há empréstimos relacionados.";
pub const UNKNOWN_CITY_MESSAGE: &str = "A cidade informada não existe.";
pub const DUPLICATED_CUSTOMER_MESSAGE: &str = "Já existe um cliente com este email ou CPF.";

/// Error returned whenever no customer exists for `id`.
pub fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!(
        "Objeto do tipo: {} não encontrado! Id: {id}",
        type_name::<Customer>()
    ))
}

/// Fetches a single customer, failing with `NotFound` when absent.
pub fn find_customer<R>(repo: &R, id: i32) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    let Ok(customer_id) = CustomerId::new(id) else {
        return Err(not_found(id));
    };

    repo.get_customer_by_id(customer_id)?
        .ok_or_else(|| not_found(id))
}

/// Persists a new customer and returns it with the store-assigned id.
pub fn insert_customer<R>(repo: &R, new_customer: &NewCustomer) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    repo.create_customer(new_customer).map_err(|err| {
        log::error!("Failed to insert customer: {err}");
        match err {
            RepositoryError::ForeignKeyViolation(_) => {
                ServiceError::DataIntegrity(UNKNOWN_CITY_MESSAGE.to_string())
            }
            RepositoryError::UniqueViolation(_) => {
                ServiceError::DataIntegrity(DUPLICATED_CUSTOMER_MESSAGE.to_string())
            }
            other => other.into(),
        }
    })
}

/// Copies name and email onto the stored customer and saves the result. Any
/// other field in `changes` is ignored.
pub fn update_customer<R>(repo: &R, changes: &UpdateCustomer) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let Some(id) = changes.id else {
        return Err(ServiceError::BadRequest(
            "Id do cliente não informado.".to_string(),
        ));
    };

    let existing = find_customer(repo, id.get())?;
    let merged = changes.merge_into(existing);

    repo.update_customer(&merged).map_err(|err| {
        log::error!("Failed to update customer {id}: {err}");
        match err {
            RepositoryError::UniqueViolation(_) => {
                ServiceError::DataIntegrity(DUPLICATED_CUSTOMER_MESSAGE.to_string())
            }
            other => other.into(),
        }
    })
}

/// Removes a customer unless other records still reference it.
pub fn delete_customer<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let customer = find_customer(repo, id)?;

    match repo.delete_customer(customer.id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::ForeignKeyViolation(reason)) => {
            log::warn!("Refused to delete customer {id}: {reason}");
            Err(ServiceError::DataIntegrity(
                DELETE_BLOCKED_MESSAGE.to_string(),
            ))
        }
        Err(err) => {
            log::error!("Failed to delete customer {id}: {err}");
            Err(err.into())
        }
    }
}

pub fn find_all_customers<R>(repo: &R) -> ServiceResult<Vec<Customer>>
where
    R: CustomerReader + ?Sized,
{
    repo.list_customers().map_err(ServiceError::from)
}

/// Loads one zero-based page. `direction` and `order_by` are checked before
/// the repository is called.
pub fn find_customers_page<R>(
    repo: &R,
    page: usize,
    lines_per_page: usize,
    direction: &str,
    order_by: &str,
) -> ServiceResult<Page<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let direction: SortDirection = direction.parse().map_err(ServiceError::BadRequest)?;
    let order_by: CustomerSortField = order_by.parse().map_err(ServiceError::BadRequest)?;
    if lines_per_page == 0 {
        return Err(ServiceError::BadRequest(
            "linesPerPage deve ser maior que zero.".to_string(),
        ));
    }

    let query = CustomerPageQuery::new(page, lines_per_page).order_by(order_by, direction);
    let (total, customers) = repo.list_customers_page(&query)?;

    Ok(Page::new(customers, &query, total))
}

/// Builds the update input: id, name and email only.
pub fn from_summary_view(view: &CustomerSummaryView) -> ServiceResult<UpdateCustomer> {
    Ok(UpdateCustomer {
        id: view.id.and_then(|id| CustomerId::new(id).ok()),
        name: CustomerName::new(view.name.as_str())?,
        email: CustomerEmail::new(view.email.as_str())?,
    })
}

/// Builds a complete new customer with one address (city referenced by id)
/// and its phones in input order. Blank optional phones are skipped.
pub fn from_create_view(view: CustomerCreateView) -> ServiceResult<NewCustomer> {
    let address = NewAddress {
        street: view.street,
        number: view.number,
        complement: view.complement.filter(|c| !c.trim().is_empty()),
        neighborhood: view.neighborhood,
        postal_code: view.postal_code,
        city_id: CityId::new(view.city_id)?,
    };

    // A blank optional phone counts as absent; phones are never stored empty.
    let mut phones = vec![PhoneNumber::new(view.phone1)?];
    for extra in [view.phone2, view.phone3].into_iter().flatten() {
        if !extra.trim().is_empty() {
            phones.push(PhoneNumber::new(extra)?);
        }
    }

    Ok(NewCustomer {
        name: CustomerName::new(view.name)?,
        email: CustomerEmail::new(view.email)?,
        tax_id: TaxId::new(view.tax_id)?,
        registry_id: RegistryId::new(view.registry_id)?,
        income: view.income,
        password_hash: hash_password(&view.password)?,
        addresses: vec![address],
        phones,
    })
}

fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {e}")))
}
