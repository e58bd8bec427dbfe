#![allow(dead_code)]

use tempfile::TempDir;
use tqi_clientes::db::{DbPool, establish_connection_pool, run_migrations};
use tqi_clientes::domain::customer::{NewAddress, NewCustomer};
use tqi_clientes::domain::types::{
    CityId, CustomerEmail, CustomerName, PhoneNumber, RegistryId, TaxId,
};

/// Migrated SQLite database living in a temporary directory for one test.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("failed to create pool");
        run_migrations(&pool).expect("failed to run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Valid CPF derived from `seed`, unique per seed.
pub fn cpf(seed: u32) -> TaxId {
    let base = format!("{:09}", 100_000_000 + seed);
    let mut digits: Vec<u32> = base.chars().filter_map(|c| c.to_digit(10)).collect();
    for position in [9u32, 10] {
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, d)| d * (position + 1 - i as u32))
            .sum();
        digits.push(sum * 10 % 11 % 10);
    }
    let raw: String = digits.iter().map(|d| d.to_string()).collect();
    TaxId::new(raw).expect("generated CPF is valid")
}

pub fn new_customer(seed: u32, name: &str, city_id: i32, phones: &[&str]) -> NewCustomer {
    NewCustomer {
        name: CustomerName::new(name).unwrap(),
        email: CustomerEmail::new(format!("cliente{seed}@example.com")).unwrap(),
        tax_id: cpf(seed),
        registry_id: RegistryId::new(format!("MG-{seed}")).unwrap(),
        income: 1000.0 * f64::from(seed),
        password_hash: "$argon2id$v=19$stub".to_string(),
        addresses: vec![NewAddress {
            street: "Rua das Flores".to_string(),
            number: seed.to_string(),
            complement: None,
            neighborhood: "Centro".to_string(),
            postal_code: "38400000".to_string(),
            city_id: CityId::new(city_id).unwrap(),
        }],
        phones: phones.iter().map(|p| PhoneNumber::new(*p).unwrap()).collect(),
    }
}

/// Adds a loan row referencing the customer, which blocks its deletion.
pub fn add_loan(pool: &DbPool, customer_id: i32) {
    use diesel::prelude::*;
    use diesel::sql_types::Integer;

    let mut conn = pool.get().expect("connection");
    diesel::sql_query(
        "INSERT INTO loans (customer_id, amount, installments, first_installment_date) \
         VALUES (?, 5000.0, 12, '2024-06-01')",
    )
    .bind::<Integer, _>(customer_id)
    .execute(&mut conn)
    .expect("failed to insert loan");
}
