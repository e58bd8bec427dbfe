//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, CPF check digits) so that once a value reaches
//! the domain layer it can be treated as trusted.
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided CPF has the wrong length or check digits.
    #[error("invalid CPF")]
    InvalidTaxId,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(CustomerId, "Unique identifier for a customer.");
id_newtype!(CityId, "Unique identifier for a city.");
id_newtype!(StateId, "Unique identifier for a federative unit.");

/// Lower-cased and validated customer email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CustomerEmail(String);

impl CustomerEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CustomerEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a string wrapper that is trimmed and never empty.
macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

non_empty_string_newtype!(
    CustomerName,
    "Customer name wrapper enforcing non-empty values."
);

non_empty_string_newtype!(
    RegistryId,
    "National registry (RG) wrapper enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(
    PhoneNumber,
    "Phone number wrapper enforcing trimmed, non-empty values."
);

/// Brazilian individual taxpayer number (CPF), stored as its 11 digits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
    /// Strips punctuation and verifies both check digits.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.into();
        let digits: Vec<u32> = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '.' | '-'))
            .map(|c| c.to_digit(10).ok_or(TypeConstraintError::InvalidTaxId))
            .collect::<Result<_, _>>()?;

        if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
            return Err(TypeConstraintError::InvalidTaxId);
        }

        for position in [9, 10] {
            let sum: u32 = digits[..position]
                .iter()
                .enumerate()
                .map(|(i, d)| d * (position as u32 + 1 - i as u32))
                .sum();
            if (sum * 10) % 11 % 10 != digits[position] {
                return Err(TypeConstraintError::InvalidTaxId);
            }
        }

        Ok(Self(digits.iter().map(|d| char::from(b'0' + *d as u8)).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaxId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(CustomerId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(CityId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(CustomerId::new(7).map(CustomerId::get), Ok(7));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = CustomerEmail::new("  Ana@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ana@example.com");
        assert_eq!(
            CustomerEmail::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn name_rejects_blank_values() {
        assert_eq!(
            CustomerName::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
        assert_eq!(CustomerName::new(" Ana ").unwrap().as_str(), "Ana");
    }

    #[test]
    fn tax_id_accepts_valid_cpf_with_or_without_mask() {
        assert_eq!(TaxId::new("529.982.247-25").unwrap().as_str(), "52998224725");
        assert_eq!(TaxId::new("11144477735").unwrap().as_str(), "11144477735");
    }

    #[test]
    fn tax_id_rejects_bad_check_digits_and_repeated_digits() {
        assert_eq!(
            TaxId::new("12345678900"),
            Err(TypeConstraintError::InvalidTaxId)
        );
        assert_eq!(
            TaxId::new("11111111111"),
            Err(TypeConstraintError::InvalidTaxId)
        );
        assert_eq!(TaxId::new("123"), Err(TypeConstraintError::InvalidTaxId));
        assert_eq!(
            TaxId::new("5299822472a"),
            Err(TypeConstraintError::InvalidTaxId)
        );
    }
}
