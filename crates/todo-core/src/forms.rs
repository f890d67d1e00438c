//! Form schemas
//!
//! Field-shape checks run before anything touches the network. The forms
//! serialize directly into the register/login request bodies.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

#[derive(Clone, Default, Serialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Clone, Default, Serialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl SignupForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(FieldErrors::from)
    }
}

impl LoginForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(FieldErrors::from)
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// First validation message per field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                fields.insert(field.to_string(), message);
            }
        }
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, email: &str, password: &str) -> SignupForm {
        SignupForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_signup_all_fields_invalid() {
        let errors = signup("Al", "bad", "12345").check().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("Name must be at least 3 characters"));
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_signup_valid() {
        assert!(signup("Alice", "alice@example.com", "secret1").check().is_ok());
    }

    #[test]
    fn test_signup_boundaries() {
        assert!(signup("Ali", "a@x.com", "123456").check().is_ok());

        let errors = signup("Ali", "a@x.com", "").check().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn test_login_rejects_empty_email() {
        let form = LoginForm {
            email: String::new(),
            password: "secret1".to_string(),
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert!(errors.get("password").is_none());
    }

    #[test]
    fn test_login_body_shape() {
        let form = LoginForm {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };
        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@x.com", "password": "secret1"}));
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", signup("Alice", "a@x.com", "hunter22"));
        assert!(!rendered.contains("hunter22"));
    }
}
