use crate::{
    Error,
    error::{StorageError, ValidationError},
};

/// Extension trait for Result types to simplify backend error mapping
///
/// Backends talk to whatever client library their identity store ships with;
/// this folds those errors into warden storage errors.
///
/// # Example
///
/// ```rust,ignore
/// use warden_core::error::utilities::StoreResultExt;
///
/// // Instead of:
/// // client.get_account(id).await.map_err(|e| Error::Storage(StorageError::Directory(format!("Failed to load account: {e}"))))?;
///
/// // Use:
/// client.get_account(id).await.map_directory_err_with_context("Failed to load account")?;
/// ```
pub trait StoreResultExt<T> {
    /// Convert an account directory error with additional context
    fn map_directory_err_with_context(self, context: &str) -> Result<T, Error>;
}

impl<T, E: std::fmt::Display> StoreResultExt<T> for Result<T, E> {
    fn map_directory_err_with_context(self, context: &str) -> Result<T, Error> {
        self.map_err(|e| Error::Storage(StorageError::Directory(format!("{context}: {e}"))))
    }
}

/// Extension trait for Option types to simplify required field validation
///
/// # Example
///
/// ```rust,ignore
/// use warden_core::error::utilities::RequiredFieldExt;
///
/// let password = self.password.require_field("Password")?;
/// ```
pub trait RequiredFieldExt<T> {
    /// Convert None to a ValidationError::MissingField
    fn require_field(self, field_name: &str) -> Result<T, ValidationError>;
}

impl<T> RequiredFieldExt<T> for Option<T> {
    fn require_field(self, field_name: &str) -> Result<T, ValidationError> {
        self.ok_or_else(|| ValidationError::MissingField(format!("{field_name} is required")))
    }
}
