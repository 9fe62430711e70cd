//! Input validation for album, photo and account payloads
//!
//! Every value that reaches the document store from a form or JSON body goes
//! through [`InputValidator`] first. Validators return the normalized value
//! (trimmed, lowercased where relevant) so callers store exactly what was
//! checked.

use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::Category;
use crate::database::models::{AlbumInput, PhotoUpdate};

/// Maximum lengths for various input types
pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 72; // bcrypt truncates beyond this

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// Validation error types
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    TooLong { field: String, max_length: usize, actual_length: usize },
    TooShort { field: String, min_length: usize, actual_length: usize },
    InvalidFormat { field: String, expected: String },
    Empty { field: String },
    UnknownCategory { value: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TooLong { field, max_length, actual_length } => {
                write!(
                    f,
                    "Field '{}' is too long: {} characters (max: {})",
                    field, actual_length, max_length
                )
            }
            ValidationError::TooShort { field, min_length, actual_length } => {
                write!(
                    f,
                    "Field '{}' is too short: {} characters (min: {})",
                    field, actual_length, min_length
                )
            }
            ValidationError::InvalidFormat { field, expected } => {
                write!(f, "Field '{}' has invalid format. Expected: {}", field, expected)
            }
            ValidationError::Empty { field } => {
                write!(f, "Field '{}' cannot be empty", field)
            }
            ValidationError::UnknownCategory { value } => {
                write!(f, "Unknown category: '{}'", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Input validator for gallery payloads
pub struct InputValidator;

impl InputValidator {
    /// Validate email address
    pub fn validate_email(email: &str) -> ValidationResult<String> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::Empty { field: "email".to_string() });
        }

        if email.len() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::TooLong {
                field: "email".to_string(),
                max_length: MAX_EMAIL_LENGTH,
                actual_length: email.len(),
            });
        }

        if !EMAIL_REGEX.is_match(email) {
            return Err(ValidationError::InvalidFormat {
                field: "email".to_string(),
                expected: "valid email address format".to_string(),
            });
        }

        Ok(email.to_lowercase())
    }

    /// Validate a new account password
    pub fn validate_password(password: &str) -> ValidationResult<()> {
        let length = password.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::TooShort {
                field: "password".to_string(),
                min_length: MIN_PASSWORD_LENGTH,
                actual_length: length,
            });
        }

        if password.len() > MAX_PASSWORD_LENGTH {
            return Err(ValidationError::TooLong {
                field: "password".to_string(),
                max_length: MAX_PASSWORD_LENGTH,
                actual_length: password.len(),
            });
        }

        Ok(())
    }

    /// Validate a required single-line text field
    pub fn validate_required(
        field: &str,
        value: &str,
        max_length: usize,
    ) -> ValidationResult<String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: field.to_string() });
        }

        Self::validate_optional(field, value, max_length)
    }

    /// Validate an optional free-text field
    pub fn validate_optional(
        field: &str,
        value: &str,
        max_length: usize,
    ) -> ValidationResult<String> {
        let value = value.trim();
        let length = value.chars().count();
        if length > max_length {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max_length,
                actual_length: length,
            });
        }

        Ok(value.to_string())
    }

    /// Validate a category label or slug against the service catalog
    pub fn validate_category(value: &str) -> ValidationResult<Category> {
        Category::parse(value.trim()).ok_or_else(|| ValidationError::UnknownCategory {
            value: value.trim().to_string(),
        })
    }

    /// Validate and normalize an album payload
    pub fn validate_album(input: &AlbumInput) -> ValidationResult<AlbumInput> {
        let name = Self::validate_required("name", &input.name, MAX_NAME_LENGTH)?;
        let description =
            Self::validate_optional("description", &input.description, MAX_DESCRIPTION_LENGTH)?;
        let category = Self::validate_category(&input.category)?;

        Ok(AlbumInput {
            name,
            description,
            category: category.label().to_string(),
        })
    }

    /// Validate and normalize a photo metadata payload
    pub fn validate_photo(update: &PhotoUpdate) -> ValidationResult<PhotoUpdate> {
        Ok(PhotoUpdate {
            title: Self::validate_required("title", &update.title, MAX_TITLE_LENGTH)?,
            description: Self::validate_optional(
                "description",
                &update.description,
                MAX_DESCRIPTION_LENGTH,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert_eq!(
            InputValidator::validate_email("  Admin@Oriani.com.br ").unwrap(),
            "admin@oriani.com.br"
        );
        assert!(InputValidator::validate_email("user.name+tag@domain.co.uk").is_ok());

        assert!(InputValidator::validate_email("").is_err());
        assert!(InputValidator::validate_email("invalid-email").is_err());
        assert!(InputValidator::validate_email("@domain.com").is_err());
        assert!(InputValidator::validate_email("user@").is_err());
    }

    #[test]
    fn test_password_validation() {
        assert!(InputValidator::validate_password("longenough").is_ok());
        assert!(matches!(
            InputValidator::validate_password("short"),
            Err(ValidationError::TooShort { .. })
        ));
        assert!(InputValidator::validate_password(&"x".repeat(100)).is_err());
    }

    #[test]
    fn test_album_validation_normalizes_category() {
        let input = AlbumInput {
            name: "  Quadro novo ".to_string(),
            description: "Troca completa".to_string(),
            category: "eletrica".to_string(),
        };

        let validated = InputValidator::validate_album(&input).unwrap();
        assert_eq!(validated.name, "Quadro novo");
        assert_eq!(validated.category, "Elétrica");
    }

    #[test]
    fn test_album_validation_rejects_bad_input() {
        let mut input = AlbumInput {
            name: "".to_string(),
            description: String::new(),
            category: "Pintura".to_string(),
        };
        assert_eq!(
            InputValidator::validate_album(&input),
            Err(ValidationError::Empty { field: "name".to_string() })
        );

        input.name = "Fachada".to_string();
        input.category = "Jardinagem".to_string();
        assert!(matches!(
            InputValidator::validate_album(&input),
            Err(ValidationError::UnknownCategory { .. })
        ));

        input.category = "Pintura".to_string();
        input.description = "a".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert!(matches!(
            InputValidator::validate_album(&input),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_photo_validation() {
        let update = PhotoUpdate {
            title: " Antes e Depois ".to_string(),
            description: String::new(),
        };
        assert_eq!(InputValidator::validate_photo(&update).unwrap().title, "Antes e Depois");

        let blank = PhotoUpdate {
            title: "   ".to_string(),
            description: String::new(),
        };
        assert!(InputValidator::validate_photo(&blank).is_err());
    }
}
