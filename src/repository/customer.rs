use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::location::{City, State};
use crate::domain::types::{CustomerId, TypeConstraintError};
use crate::models::customer::{
    Address as DbAddress, Customer as DbCustomer, NewAddress as DbNewAddress,
    NewCustomer as DbNewCustomer, NewPhone as DbNewPhone, Phone as DbPhone,
    UpdateCustomer as DbUpdateCustomer,
};
use crate::models::location::{City as DbCity, State as DbState};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CustomerPageQuery, CustomerReader, CustomerSortField, CustomerWriter, DieselRepository,
    SortDirection,
};
use crate::schema::{addresses, cities, customers, phones, states};

macro_rules! order_boxed {
    ($statement:expr, $column:expr, $direction:expr) => {
        match $direction {
            SortDirection::Asc => $statement.order($column.asc()),
            SortDirection::Desc => $statement.order($column.desc()),
        }
    };
}

/// Loads addresses (with city and state) and phones for every row in three
/// batched queries and assembles the aggregates, keeping the row order.
fn load_aggregates(
    conn: &mut SqliteConnection,
    rows: Vec<DbCustomer>,
) -> RepositoryResult<Vec<Customer>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let address_rows = DbAddress::belonging_to(&rows)
        .select(DbAddress::as_select())
        .order(addresses::id.asc())
        .load::<DbAddress>(conn)?;
    let phone_rows = DbPhone::belonging_to(&rows)
        .select(DbPhone::as_select())
        .load::<DbPhone>(conn)?;

    let city_ids: Vec<i32> = address_rows.iter().map(|a| a.city_id).collect();
    let city_rows = cities::table
        .filter(cities::id.eq_any(city_ids))
        .select(DbCity::as_select())
        .load::<DbCity>(conn)?;

    let state_ids: Vec<i32> = city_rows.iter().map(|c| c.state_id).collect();
    let state_by_id = states::table
        .filter(states::id.eq_any(state_ids))
        .select(DbState::as_select())
        .load::<DbState>(conn)?
        .into_iter()
        .map(|state| Ok((state.id, State::try_from(state)?)))
        .collect::<Result<HashMap<i32, State>, TypeConstraintError>>()?;

    let city_by_id = city_rows
        .into_iter()
        .map(|city| {
            let state = state_by_id.get(&city.state_id).cloned();
            Ok((city.id, city.into_domain(state)?))
        })
        .collect::<Result<HashMap<i32, City>, TypeConstraintError>>()?;

    let addresses_by_customer = address_rows.grouped_by(&rows);
    let phones_by_customer = phone_rows.grouped_by(&rows);

    rows.into_iter()
        .zip(addresses_by_customer)
        .zip(phones_by_customer)
        .map(|((row, address_rows), phone_rows)| {
            let addresses = address_rows
                .into_iter()
                .map(|address| {
                    let city = city_by_id.get(&address.city_id).cloned().ok_or_else(|| {
                        RepositoryError::DatabaseError(format!(
                            "City {} referenced by address {} does not exist",
                            address.city_id, address.id
                        ))
                    })?;
                    Ok(address.into_domain(city))
                })
                .collect::<RepositoryResult<Vec<_>>>()?;
            Ok(row.into_domain(addresses, phone_rows)?)
        })
        .collect()
}

fn load_one(conn: &mut SqliteConnection, row: DbCustomer) -> RepositoryResult<Customer> {
    load_aggregates(conn, vec![row])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;

        let row = customers::table
            .find(id.get())
            .select(DbCustomer::as_select())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        row.map(|row| load_one(&mut conn, row)).transpose()
    }

    fn list_customers(&self) -> RepositoryResult<Vec<Customer>> {
        let mut conn = self.conn()?;

        let rows = customers::table
            .order(customers::id.asc())
            .select(DbCustomer::as_select())
            .load::<DbCustomer>(&mut conn)?;

        load_aggregates(&mut conn, rows)
    }

    fn list_customers_page(
        &self,
        query: &CustomerPageQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        let mut conn = self.conn()?;

        let statement = customers::table
            .select(DbCustomer::as_select())
            .into_boxed();

        let statement = match query.order_by {
            CustomerSortField::Id => order_boxed!(statement, customers::id, query.direction),
            CustomerSortField::Name => order_boxed!(statement, customers::name, query.direction),
            CustomerSortField::Email => order_boxed!(statement, customers::email, query.direction),
            CustomerSortField::TaxId => order_boxed!(statement, customers::tax_id, query.direction),
            CustomerSortField::RegistryId => {
                order_boxed!(statement, customers::registry_id, query.direction)
            }
            CustomerSortField::Income => {
                order_boxed!(statement, customers::income, query.direction)
            }
        };

        let total: i64 = customers::table.count().get_result(&mut conn)?;

        let Some(offset) = query.offset() else {
            return Ok((total as usize, Vec::new()));
        };

        let rows = statement
            .then_order_by(customers::id.asc())
            .limit(query.limit())
            .offset(offset)
            .load::<DbCustomer>(&mut conn)?;

        Ok((total as usize, load_aggregates(&mut conn, rows)?))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::insert_into(customers::table)
                .values(DbNewCustomer::from(new_customer))
                .get_result::<DbCustomer>(conn)?;

            let new_addresses: Vec<DbNewAddress> = new_customer
                .addresses
                .iter()
                .map(|address| DbNewAddress::for_customer(row.id, address))
                .collect();
            if !new_addresses.is_empty() {
                diesel::insert_into(addresses::table)
                    .values(&new_addresses)
                    .execute(conn)?;
            }

            let new_phones: Vec<DbNewPhone> = new_customer
                .phones
                .iter()
                .enumerate()
                .map(|(position, number)| DbNewPhone {
                    customer_id: row.id,
                    position: position as i32,
                    number: number.as_str(),
                })
                .collect();
            if !new_phones.is_empty() {
                diesel::insert_into(phones::table)
                    .values(&new_phones)
                    .execute(conn)?;
            }

            load_one(conn, row)
        })
    }

    fn update_customer(&self, customer: &Customer) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::update(customers::table.find(customer.id.get()))
                .set(DbUpdateCustomer::from(customer))
                .get_result::<DbCustomer>(conn)?;

            load_one(conn, row)
        })
    }

    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::delete(customers::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
