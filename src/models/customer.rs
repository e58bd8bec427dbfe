use diesel::prelude::*;

use crate::domain::customer::{
    Address as DomainAddress, Customer as DomainCustomer, NewAddress as DomainNewAddress,
    NewCustomer as DomainNewCustomer,
};
use crate::domain::location::City as DomainCity;
use crate::domain::types::{CustomerId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`] scalar columns.
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub registry_id: String,
    pub income: f64,
    pub password_hash: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub tax_id: &'a str,
    pub registry_id: &'a str,
    pub income: f64,
    pub password_hash: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
/// Scalar columns written back when a merged customer is saved.
pub struct UpdateCustomer<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub tax_id: &'a str,
    pub registry_id: &'a str,
    pub income: f64,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::addresses)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
pub struct Address {
    pub id: i32,
    pub customer_id: i32,
    pub city_id: i32,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::addresses)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewAddress<'a> {
    pub customer_id: i32,
    pub city_id: i32,
    pub street: &'a str,
    pub number: &'a str,
    pub complement: Option<&'a str>,
    pub neighborhood: &'a str,
    pub postal_code: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::phones)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(primary_key(customer_id, position))]
pub struct Phone {
    pub customer_id: i32,
    pub position: i32,
    pub number: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::phones)]
pub struct NewPhone<'a> {
    pub customer_id: i32,
    pub position: i32,
    pub number: &'a str,
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            name: customer.name.as_str(),
            email: customer.email.as_str(),
            tax_id: customer.tax_id.as_str(),
            registry_id: customer.registry_id.as_str(),
            income: customer.income,
            password_hash: customer.password_hash.as_str(),
        }
    }
}

impl<'a> From<&'a DomainCustomer> for UpdateCustomer<'a> {
    fn from(customer: &'a DomainCustomer) -> Self {
        Self {
            name: customer.name.as_str(),
            email: customer.email.as_str(),
            tax_id: customer.tax_id.as_str(),
            registry_id: customer.registry_id.as_str(),
            income: customer.income,
            password_hash: customer.password_hash.as_str(),
        }
    }
}

impl<'a> NewAddress<'a> {
    pub fn for_customer(customer_id: i32, address: &'a DomainNewAddress) -> Self {
        Self {
            customer_id,
            city_id: address.city_id.get(),
            street: address.street.as_str(),
            number: address.number.as_str(),
            complement: address.complement.as_deref(),
            neighborhood: address.neighborhood.as_str(),
            postal_code: address.postal_code.as_str(),
        }
    }
}

impl Address {
    /// Builds the domain address once its city has been resolved.
    pub fn into_domain(self, city: DomainCity) -> DomainAddress {
        DomainAddress {
            id: self.id,
            street: self.street,
            number: self.number,
            complement: self.complement,
            neighborhood: self.neighborhood,
            postal_code: self.postal_code,
            city,
        }
    }
}

impl Customer {
    /// Assembles the aggregate from the row and its already loaded children.
    pub fn into_domain(
        self,
        addresses: Vec<DomainAddress>,
        phones: Vec<Phone>,
    ) -> Result<DomainCustomer, TypeConstraintError> {
        let mut phones = phones;
        phones.sort_by_key(|phone| phone.position);

        Ok(DomainCustomer {
            id: CustomerId::new(self.id)?,
            name: self.name,
            email: self.email,
            tax_id: self.tax_id,
            registry_id: self.registry_id,
            income: self.income,
            password_hash: self.password_hash,
            addresses,
            phones: phones.into_iter().map(|phone| phone.number).collect(),
        })
    }
}
