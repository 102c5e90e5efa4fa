pub mod utilities;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("realm is required")]
    RealmRequired,

    #[error("username or email is required")]
    UsernameOrEmailRequired,

    /// Deliberately uninformative: unknown principals and wrong passwords
    /// both end up here.
    #[error("login failed")]
    LoginFailed,

    #[error("login failed as the email has not been verified")]
    LoginFailedEmailNotVerified,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid current password")]
    InvalidPassword,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not find access token")]
    TokenNotFound,

    #[error("Access token expired")]
    Expired,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Session store error: {0}")]
    SessionStore(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Record not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// HTTP-equivalent status class for transports that need one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorStatus {
    BadRequest,
    Unauthorized,
    NotFound,
    Unprocessable,
    Internal,
}

impl ErrorStatus {
    pub fn as_u16(&self) -> u16 {
        match self {
            ErrorStatus::BadRequest => 400,
            ErrorStatus::Unauthorized => 401,
            ErrorStatus::NotFound => 404,
            ErrorStatus::Unprocessable => 422,
            ErrorStatus::Internal => 500,
        }
    }
}

impl Error {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Error::Auth(AuthError::RealmRequired) => "REALM_REQUIRED",
            Error::Auth(AuthError::UsernameOrEmailRequired) => "USERNAME_EMAIL_REQUIRED",
            Error::Auth(AuthError::LoginFailed) => "LOGIN_FAILED",
            Error::Auth(AuthError::LoginFailedEmailNotVerified) => {
                "LOGIN_FAILED_EMAIL_NOT_VERIFIED"
            }
            Error::Auth(AuthError::UserNotFound) => "USER_NOT_FOUND",
            Error::Auth(AuthError::UserAlreadyExists) => "USER_ALREADY_EXISTS",
            Error::Auth(AuthError::InvalidToken(_)) => "INVALID_TOKEN",
            Error::Auth(AuthError::InvalidPassword) => "INVALID_PASSWORD",
            Error::Session(SessionError::TokenNotFound) => "TOKEN_NOT_FOUND",
            Error::Session(SessionError::Expired) => "TOKEN_EXPIRED",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn status(&self) -> ErrorStatus {
        match self {
            Error::Auth(
                AuthError::RealmRequired
                | AuthError::UsernameOrEmailRequired
                | AuthError::InvalidToken(_)
                | AuthError::InvalidPassword,
            ) => ErrorStatus::BadRequest,
            Error::Auth(AuthError::LoginFailed | AuthError::LoginFailedEmailNotVerified) => {
                ErrorStatus::Unauthorized
            }
            Error::Session(_) => ErrorStatus::Unauthorized,
            Error::Auth(AuthError::UserNotFound) => ErrorStatus::NotFound,
            Error::Auth(AuthError::UserAlreadyExists) | Error::Validation(_) => {
                ErrorStatus::Unprocessable
            }
            Error::Storage(_) => ErrorStatus::Internal,
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    pub fn is_session_error(&self) -> bool {
        matches!(self, Error::Session(_))
    }
}
