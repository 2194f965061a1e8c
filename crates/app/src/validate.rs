//! Form validation.
//!
//! Field checks mirroring the register's form schemas. Validation runs
//! before any network call and failures never reach the server; they are
//! keyed by field for inline display.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field the message belongs to.
    pub field: &'static str,

    /// Message to display inline.
    pub message: &'static str,
}

/// All failed checks of one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }

        Ok(())
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn email_is_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

/// Validate a login form.
///
/// # Errors
///
/// Returns the failed field checks.
pub fn login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if email.is_empty() {
        errors.push(FieldError {
            field: "email",
            message: "email is required",
        });
    } else if !email_is_valid(email) {
        errors.push(FieldError {
            field: "email",
            message: "enter a valid email",
        });
    }

    if password.is_empty() {
        errors.push(FieldError {
            field: "password",
            message: "password is required",
        });
    }

    finish(errors)
}

/// Validate the one-time admin setup form.
///
/// # Errors
///
/// Returns the failed field checks.
pub fn setup_admin(name: &str, email: &str, password: &str) -> Result<(), ValidationErrors> {
    account_fields(name, email, password)
}

/// Validate a create-user form.
///
/// # Errors
///
/// Returns the failed field checks.
pub fn new_user(
    name: &str,
    email: &str,
    password: &str,
    role_id: i64,
) -> Result<(), ValidationErrors> {
    let mut errors = match account_fields(name, email, password) {
        Ok(()) => Vec::new(),
        Err(ValidationErrors(errors)) => errors,
    };

    if role_id < 1 {
        errors.push(FieldError {
            field: "roleId",
            message: "select a role",
        });
    }

    finish(errors)
}

/// Validate an edit-user form. Absent fields are left untouched by the
/// server, so only the provided ones are checked.
///
/// # Errors
///
/// Returns the failed field checks.
pub fn update_user(
    name: Option<&str>,
    email: Option<&str>,
    role_id: Option<i64>,
) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if let Some(name) = name
        && name.chars().count() < 2
    {
        errors.push(FieldError {
            field: "name",
            message: "name must have at least 2 characters",
        });
    }

    if let Some(email) = email
        && !email_is_valid(email)
    {
        errors.push(FieldError {
            field: "email",
            message: "enter a valid email",
        });
    }

    if let Some(role_id) = role_id
        && role_id < 1
    {
        errors.push(FieldError {
            field: "roleId",
            message: "select a role",
        });
    }

    finish(errors)
}

/// Validate a product form.
///
/// # Errors
///
/// Returns the failed field checks.
pub fn product(name: &str, price: Decimal) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "name is required",
        });
    } else if name.trim().chars().count() < 2 {
        errors.push(FieldError {
            field: "name",
            message: "name must have at least 2 characters",
        });
    }

    if price <= Decimal::ZERO {
        errors.push(FieldError {
            field: "price",
            message: "price must be greater than 0",
        });
    }

    finish(errors)
}

fn account_fields(name: &str, email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "name is required",
        });
    } else if name.chars().count() < 2 {
        errors.push(FieldError {
            field: "name",
            message: "name must have at least 2 characters",
        });
    }

    if email.is_empty() {
        errors.push(FieldError {
            field: "email",
            message: "email is required",
        });
    } else if !email_is_valid(email) {
        errors.push(FieldError {
            field: "email",
            message: "enter a valid email",
        });
    }

    if password.is_empty() {
        errors.push(FieldError {
            field: "password",
            message: "password is required",
        });
    } else if password.chars().count() < 8 {
        errors.push(FieldError {
            field: "password",
            message: "password must have at least 8 characters",
        });
    }

    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(result: Result<(), ValidationErrors>) -> Vec<&'static str> {
        match result {
            Ok(()) => Vec::new(),
            Err(ValidationErrors(errors)) => errors.iter().map(|error| error.field).collect(),
        }
    }

    #[test]
    fn login_accepts_a_filled_form() {
        assert!(login("sam@example.com", "secret").is_ok());
    }

    #[test]
    fn login_flags_each_missing_field() {
        assert_eq!(fields(login("", "")), ["email", "password"]);
    }

    #[test]
    fn login_rejects_a_malformed_email() {
        assert_eq!(fields(login("not-an-email", "secret")), ["email"]);
        assert_eq!(fields(login("a@b", "secret")), ["email"]);
        assert_eq!(fields(login("a b@c.com", "secret")), ["email"]);
    }

    #[test]
    fn setup_admin_enforces_password_length() {
        assert_eq!(fields(setup_admin("Sam", "sam@example.com", "short")), ["password"]);
        assert!(setup_admin("Sam", "sam@example.com", "long enough").is_ok());
    }

    #[test]
    fn setup_admin_enforces_name_length() {
        assert_eq!(fields(setup_admin("S", "sam@example.com", "long enough")), ["name"]);
    }

    #[test]
    fn new_user_requires_a_role() {
        assert_eq!(fields(new_user("Sam", "sam@example.com", "long enough", 0)), ["roleId"]);
        assert!(new_user("Sam", "sam@example.com", "long enough", 2).is_ok());
    }

    #[test]
    fn product_rejects_non_positive_prices_and_short_names() {
        assert_eq!(fields(product("  ", Decimal::new(-1, 0))), ["name", "price"]);
        assert_eq!(fields(product("L", Decimal::ONE)), ["name"]);
        assert_eq!(fields(product("Latte", Decimal::ZERO)), ["price"]);
        assert!(product("Latte", Decimal::new(1, 2)).is_ok());
    }

    #[test]
    fn update_user_checks_only_the_provided_fields() {
        assert!(update_user(None, None, None).is_ok());
        assert!(update_user(Some("Sam"), Some("sam@example.com"), Some(2)).is_ok());
        assert_eq!(fields(update_user(Some("S"), None, None)), ["name"]);
        assert_eq!(
            fields(update_user(None, Some("not-an-email"), Some(0))),
            ["email", "roleId"]
        );
    }

    #[test]
    fn errors_display_field_and_message() {
        let message = login("", "secret").map_err(|errors| errors.to_string());

        assert_eq!(message, Err("email: email is required".to_string()));
    }
}
