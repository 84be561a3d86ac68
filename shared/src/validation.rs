//! Validation utilities for the workshop dashboard
//!
//! Every check here runs before a request is submitted. The backend remains
//! the authority on balances; these rules only catch obvious mistakes early.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use validator::Validate;

use crate::types::Id;

/// Validation failures surfaced inline before submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0}")]
    Invalid(&'static str),

    #[error("An entry named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("Sender and receiver must be different organizations")]
    SameOrganization,

    #[error("Add at least one {0}")]
    NoLines(&'static str),

    #[error("Invalid fields: {0}")]
    Fields(String),
}

// ============================================================================
// Quantity Validations
// ============================================================================

/// Parse a form quantity; only positive decimals are accepted
pub fn parse_quantity(raw: &str) -> Result<Decimal, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Quantity is required");
    }
    let quantity = Decimal::from_str(trimmed).map_err(|_| "Quantity must be a number")?;
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(quantity)
}

/// Parse a selected entity id from a form field
pub fn parse_id(raw: &str) -> Option<Id> {
    raw.trim().parse().ok()
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate username (3-150 chars of letters, digits and @.+-_)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 150 {
        return Err("Username must be at most 150 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        return Err("Username may contain only letters, digits and @.+-_");
    }
    Ok(())
}

/// Reject a name already used by another entry (case-insensitive)
pub fn ensure_unique_name<'a, I>(
    name: &str,
    existing: I,
    except: Option<Id>,
) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (Id, &'a str)>,
{
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return Err(ValidationError::Required("Name"));
    }
    let taken = existing
        .into_iter()
        .any(|(id, other)| Some(id) != except && other.trim().to_lowercase() == wanted);
    if taken {
        return Err(ValidationError::DuplicateName(name.trim().to_string()));
    }
    Ok(())
}

/// Run the derived field rules of a create payload
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ValidationError> {
    payload.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        ValidationError::Fields(fields.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewMaterial, NewUser, Unit};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_quantity_valid() {
        assert_eq!(parse_quantity("40"), Ok(dec("40")));
        assert_eq!(parse_quantity(" 100.5 "), Ok(dec("100.5")));
        assert_eq!(parse_quantity("0.001"), Ok(dec("0.001")));
    }

    #[test]
    fn test_parse_quantity_invalid() {
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("abc").is_err());
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-3").is_err());
        assert!(parse_quantity("0.000").is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("twelve"), None);
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("master@workshop.uz").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("goldsmith1").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("jeweler_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_unique_name() {
        let existing = vec![(1, "Gold 585"), (2, "Silver 925")];
        assert!(ensure_unique_name("Platinum", existing.clone(), None).is_ok());
        assert_eq!(
            ensure_unique_name(" gold 585 ", existing.clone(), None),
            Err(ValidationError::DuplicateName("gold 585".to_string()))
        );
        // Renaming an entry to its own name is not a duplicate
        assert!(ensure_unique_name("Gold 585", existing.clone(), Some(1)).is_ok());
        assert_eq!(
            ensure_unique_name("  ", existing, None),
            Err(ValidationError::Required("Name"))
        );
    }

    #[test]
    fn test_validate_payload() {
        let material = NewMaterial {
            name: String::new(),
            unit: Unit::G,
        };
        assert_eq!(
            validate_payload(&material),
            Err(ValidationError::Fields("name".to_string()))
        );

        let user = NewUser {
            username: "jeweler".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            first_name: String::new(),
            last_name: String::new(),
            organization: None,
            is_staff: false,
        };
        assert_eq!(
            validate_payload(&user),
            Err(ValidationError::Fields("email, password".to_string()))
        );
    }
}
